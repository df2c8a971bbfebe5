pub(crate) mod font;
pub(crate) mod markup;
pub(crate) mod shaper;
pub(crate) mod wrap;
