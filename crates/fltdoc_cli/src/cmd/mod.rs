/// Header validation command.
pub mod check;
/// External cache listing command.
pub mod externals;
/// Header and document summary command.
pub mod info;
/// Scene graph printing command.
pub mod tree;
/// Vertex palette listing command.
pub mod vertices;

pub(crate) mod util;
