mod json;
mod svg;

pub(crate) use json::*;
pub(crate) use svg::*;
