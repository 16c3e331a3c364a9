//! Expression evaluation against the names visible at a step

use crate::definition::types::{Definition, PosExpr, PosFn, SizeExpr, SizeFn};
use crate::geometry::{
    Pos, Size, add_pos, centering_offset, scale_factor, scale_to_fit, scale_to_height,
    scale_to_width,
};
use crate::store::Image;

use std::collections::{BTreeMap, HashMap};

/// Declared constants plus the images bound so far.
///
/// Errors are plain messages; the caller adds which step failed.
pub struct Scope<'a> {
    sizes: &'a BTreeMap<String, Size>,
    positions: &'a BTreeMap<String, Pos>,
    images: HashMap<String, Image>,
}

impl<'a> Scope<'a> {
    pub fn new(definition: &'a Definition) -> Self {
        Self {
            sizes: &definition.sizes,
            positions: &definition.positions,
            images: HashMap::new(),
        }
    }

    /// Bind (or rebind) `name` to an image
    pub fn bind(&mut self, name: &str, image: Image) {
        self.images.insert(name.to_string(), image);
    }

    pub fn image(&self, name: &str) -> Result<&Image, String> {
        self.images.get(name).ok_or_else(|| {
            if self.sizes.contains_key(name) {
                format!("\"{name}\" is a size, not an image")
            } else {
                format!("no image named \"{name}\"")
            }
        })
    }

    pub fn size(&self, expr: &SizeExpr) -> Result<Size, String> {
        match expr {
            SizeExpr::Literal(size) => Ok(*size),
            SizeExpr::Name(name) => {
                if let Some(size) = self.sizes.get(name) {
                    return Ok(*size);
                }
                match self.images.get(name) {
                    Some(image) => Ok(image.size()),
                    None => Err(format!("no size or image named \"{name}\"")),
                }
            }
            SizeExpr::Scaled(f) => match f {
                SizeFn::ScaleToWidth(size, w) => Ok(scale_to_width(self.size(size)?, *w)),
                SizeFn::ScaleToHeight(size, h) => Ok(scale_to_height(self.size(size)?, *h)),
                SizeFn::ScaleToFit(size, frame) => {
                    Ok(scale_to_fit(self.size(size)?, self.size(frame)?))
                }
                SizeFn::ScaleFactor(size, factor) => {
                    check_factor(*factor)?;
                    Ok(scale_factor(self.size(size)?, *factor))
                }
            },
        }
    }

    pub fn pos(&self, expr: &PosExpr) -> Result<Pos, String> {
        match expr {
            PosExpr::Literal(pos) => Ok(*pos),
            PosExpr::Name(name) => self
                .positions
                .get(name)
                .copied()
                .ok_or_else(|| format!("no position named \"{name}\"")),
            PosExpr::Computed(PosFn::Add(a, b)) => {
                let (a, b) = (self.pos(a)?, self.pos(b)?);
                add_pos(a, b).ok_or_else(|| format!("position {a} + {b} is out of range"))
            }
            PosExpr::Computed(PosFn::CenteringOffset {
                inner,
                outer,
                offset,
            }) => {
                let offset = match offset {
                    Some(offset) => self.pos(offset)?,
                    None => Pos::ORIGIN,
                };
                let (inner, outer) = (self.size(inner)?, self.size(outer)?);
                centering_offset(inner, outer, offset).ok_or_else(|| {
                    format!("centering {inner} in {outer} at {offset} is out of range")
                })
            }
        }
    }

    pub fn into_images(self) -> HashMap<String, Image> {
        self.images
    }
}

/// Scale factors must be positive and finite
pub fn check_factor(factor: f64) -> Result<(), String> {
    if factor.is_finite() && factor > 0.0 {
        Ok(())
    } else {
        Err(format!("scale factor {factor} is not a positive number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::Definition;

    fn definition() -> Definition {
        Definition::parse(
            r#"
sizes:
  monitor: [1920, 1080]
positions:
  right: [1200, 240]
steps: []
"#,
        )
        .unwrap()
    }

    fn size_expr(yaml: &str) -> SizeExpr {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn pos_expr(yaml: &str) -> PosExpr {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn literal_and_named_sizes() {
        let def = definition();
        let scope = Scope::new(&def);
        assert_eq!(scope.size(&size_expr("[10, 20]")), Ok(Size::new(10, 20)));
        assert_eq!(scope.size(&size_expr("monitor")), Ok(Size::new(1920, 1080)));
        assert!(scope.size(&size_expr("screen")).is_err());
    }

    #[test]
    fn nested_scaling() {
        let def = definition();
        let scope = Scope::new(&def);
        let expr = size_expr("{ scale_factor: [{ scale_to_fit: [[200, 100], monitor] }, 0.5] }");
        // fit gives 1920x960, halved
        assert_eq!(scope.size(&expr), Ok(Size::new(960, 480)));
    }

    #[test]
    fn image_names_give_their_size() {
        let def = definition();
        let mut scope = Scope::new(&def);
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("a.png");
        image::RgbImage::new(30, 40).save(&path).unwrap();
        scope.bind("photo", Image::probe(&path).unwrap());

        assert_eq!(scope.size(&size_expr("photo")), Ok(Size::new(30, 40)));
        assert_eq!(
            scope.size(&size_expr("{ scale_to_width: [photo, 60] }")),
            Ok(Size::new(60, 80))
        );
    }

    #[test]
    fn bad_factor_is_rejected() {
        let def = definition();
        let scope = Scope::new(&def);
        assert!(scope.size(&size_expr("{ scale_factor: [monitor, -1] }")).is_err());
    }

    #[test]
    fn positions() {
        let def = definition();
        let scope = Scope::new(&def);
        assert_eq!(scope.pos(&pos_expr("[5, -5]")), Ok(Pos::new(5, -5)));
        assert_eq!(
            scope.pos(&pos_expr("{ add: [right, [10, 10]] }")),
            Ok(Pos::new(1210, 250))
        );
        assert_eq!(
            scope.pos(&pos_expr(
                "{ centering_offset: { inner: [200, 100], outer: monitor } }"
            )),
            Ok(Pos::new(860, 490))
        );
        assert_eq!(
            scope.pos(&pos_expr(
                "{ centering_offset: { inner: [200, 100], outer: monitor, offset: right } }"
            )),
            Ok(Pos::new(2060, 730))
        );
        assert!(scope.pos(&pos_expr("left")).is_err());
    }

    #[test]
    fn size_name_is_not_an_image() {
        let def = definition();
        let scope = Scope::new(&def);
        let err = scope.image("monitor").unwrap_err();
        assert!(err.contains("is a size"));
    }
}
