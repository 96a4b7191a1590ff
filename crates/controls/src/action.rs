use meshspin_common::MeshKind;

/// A high-level request produced by a UI control.
///
/// Front ends (desktop overlay, headless CLI) emit actions; the viewport
/// applies them between animation ticks.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Set a mesh's rotation speed from a slider value.
    SetSpeed(MeshKind, f32),
    /// Set a mesh's rotation speed from numeric field text.
    SetSpeedText(MeshKind, String),
    /// Flip a mesh's visibility.
    ToggleVisibility(MeshKind),
}
