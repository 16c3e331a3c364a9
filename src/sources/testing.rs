//! Test doubles for the source cache

use crate::error::{Error, Result};
use crate::geometry::Size;
use crate::sources::operations::Fetch;
use crate::sources::types::{Catalog, CleanRecipe, Source};

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::Cursor;

/// Fetcher that serves a canned body (or fails) and records every URL asked for
pub struct MockFetcher {
    body: Option<Vec<u8>>,
    requested: RefCell<Vec<String>>,
}

impl MockFetcher {
    pub fn serving(body: Vec<u8>) -> Self {
        Self {
            body: Some(body),
            requested: RefCell::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            body: None,
            requested: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requested.borrow().len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl Fetch for MockFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.requested.borrow_mut().push(url.to_string());
        self.body
            .clone()
            .ok_or_else(|| Error::fetch(url, "connection refused"))
    }
}

/// A solid-colored JPEG of the given size
pub fn jpeg_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(w, h, Rgb([200, 120, 40]));
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)
        .unwrap();
    buf
}

/// Two sources: "Test Sat" (with a clean recipe) and "Plain Sat" (without)
pub fn test_catalog() -> Catalog {
    let urls = |base: &str| {
        BTreeMap::from([
            ("small".to_string(), format!("http://localhost/{base}/small.jpg")),
            ("large".to_string(), format!("http://localhost/{base}/large.jpg")),
        ])
    };

    Catalog::new(vec![
        Source {
            name: "Test Sat".to_string(),
            display: "Test Satellite".to_string(),
            url: urls("test"),
            interval: 600,
            clean: Some(CleanRecipe {
                variant: "large".to_string(),
                trim_bottom: 4,
                mask: Size::new(10, 10),
            }),
        },
        Source {
            name: "Plain Sat".to_string(),
            display: String::new(),
            url: urls("plain"),
            interval: 600,
            clean: None,
        },
    ])
    .unwrap()
}
