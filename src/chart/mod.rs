pub(crate) mod renderer;
pub(crate) mod svg;
pub(crate) mod table;
