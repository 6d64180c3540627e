//=========================================================================
// Graphics
//=========================================================================
//
// Built-in drawable objects and the transform they share.
//
// - `Transform` / `Transformable`: position, origin, scale, rotation
// - `Sprite`: a texture sub-rectangle
// - `Text`: a string in a backend font
//
//=========================================================================

//=== Module Declarations =================================================

mod sprite;
mod text;
mod transform;

//=== Public API ==========================================================

pub use sprite::Sprite;
pub use text::{Text, DEFAULT_FONT_SIZE};
pub use transform::{Transform, Transformable};
