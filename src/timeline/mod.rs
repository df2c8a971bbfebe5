pub(crate) mod assemble;
pub(crate) mod clip;
pub(crate) mod overlay;
pub(crate) mod sequence;
