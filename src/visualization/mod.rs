pub mod render;
pub mod frame;

#[cfg(feature = "viewer")]
pub mod atom_vis2d;
