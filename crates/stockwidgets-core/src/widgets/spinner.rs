/// Ring spinner shown while a widget waits on the network. Carries no state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spinner;

impl Spinner {
    pub const FRAMES: [&'static str; 4] = ["◜", "◝", "◞", "◟"];

    pub const fn render() -> &'static str {
        Self::FRAMES[0]
    }

    /// Frame for animation step `tick`; wraps around.
    pub const fn frame(tick: usize) -> &'static str {
        Self::FRAMES[tick % Self::FRAMES.len()]
    }
}
