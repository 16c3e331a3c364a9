//! Pipeline definition types, as read from `pipeline.yaml`

use crate::background::SinkKind;
use crate::geometry::{Pos, Size};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A declarative pipeline: named constants plus a linear list of steps
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Definition {
    /// Directory relative `open` paths are resolved against (not serialized)
    #[serde(skip)]
    pub base_dir: PathBuf,

    #[serde(default)]
    pub sizes: BTreeMap<String, Size>,
    #[serde(default)]
    pub positions: BTreeMap<String, Pos>,
    pub steps: Vec<Step>,
}

/// One step; `let` names the image the operation produces
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Step {
    #[serde(rename = "let", default)]
    pub bind: Option<String>,
    #[serde(flatten)]
    pub op: Op,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum Op {
    /// Wrap a local image file
    Open(PathBuf),
    /// Raw download of one size variant
    Get { source: String, variant: String },
    /// Download with the source's clean recipe applied
    Clean(String),
    Blank { color: String, size: SizeExpr },
    Crop {
        image: String,
        offset: PosExpr,
        size: SizeExpr,
    },
    Resize { image: String, size: SizeExpr },
    Place {
        image: String,
        offset: PosExpr,
        base: String,
    },
    ToJpg(String),
    Background {
        sink: SinkKind,
        image: String,
        #[serde(default)]
        monitor: Option<String>,
    },
}

impl Op {
    /// Keys that select an operation in a step mapping
    pub const NAMES: [&'static str; 9] = [
        "open",
        "get",
        "clean",
        "blank",
        "crop",
        "resize",
        "place",
        "to_jpg",
        "background",
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Op::Open(_) => "open",
            Op::Get { .. } => "get",
            Op::Clean(_) => "clean",
            Op::Blank { .. } => "blank",
            Op::Crop { .. } => "crop",
            Op::Resize { .. } => "resize",
            Op::Place { .. } => "place",
            Op::ToJpg(_) => "to_jpg",
            Op::Background { .. } => "background",
        }
    }

    /// Every operation but `background` yields an image and needs a `let`
    pub fn produces_image(&self) -> bool {
        !matches!(self, Op::Background { .. })
    }

    /// Names of the images this step reads
    pub fn image_inputs(&self) -> Vec<&str> {
        match self {
            Op::Crop { image, .. }
            | Op::Resize { image, .. }
            | Op::ToJpg(image)
            | Op::Background { image, .. } => vec![image.as_str()],
            Op::Place { image, base, .. } => vec![image.as_str(), base.as_str()],
            Op::Open(_) | Op::Get { .. } | Op::Clean(_) | Op::Blank { .. } => Vec::new(),
        }
    }
}

/// A size: literal `[w, h]`, a declared size or bound image by name, or a
/// scaling function applied to another size expression
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SizeExpr {
    Literal(Size),
    Name(String),
    Scaled(SizeFn),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeFn {
    ScaleToWidth(Box<SizeExpr>, u32),
    ScaleToHeight(Box<SizeExpr>, u32),
    ScaleToFit(Box<SizeExpr>, Box<SizeExpr>),
    ScaleFactor(Box<SizeExpr>, f64),
}

/// A position: literal `[x, y]`, a declared position by name, or a function
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PosExpr {
    Literal(Pos),
    Name(String),
    Computed(PosFn),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum PosFn {
    Add(Box<PosExpr>, Box<PosExpr>),
    CenteringOffset {
        inner: SizeExpr,
        outer: SizeExpr,
        #[serde(default)]
        offset: Option<Box<PosExpr>>,
    },
}
