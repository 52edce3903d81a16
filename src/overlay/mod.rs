/// Overlay rendering module
///
/// One rendering strategy: layered 2D transforms faking 3D on an iced
/// canvas (scene.rs). The models are decorative; their scale and the
/// cube's extra yaw come from `state::transform`.

pub mod scene;
