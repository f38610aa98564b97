use crate::core::Viewport;

/// Kind of host element a chart is asked to mount into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerKind {
    /// Plain block container; the only kind a chart mounts into.
    Block,
    Other(String),
}

/// Host-side mount point the chart draws into.
///
/// `size` is read again on every redraw, so hosts report resizes simply by
/// returning the new size and calling `Chart::redraw`.
pub trait ChartContainer {
    fn kind(&self) -> ContainerKind;

    fn has_content(&self) -> bool;

    fn size(&self) -> Viewport;
}

/// Container with an explicit, host-updated size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessContainer {
    kind: ContainerKind,
    has_content: bool,
    size: Viewport,
}

impl HeadlessContainer {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            kind: ContainerKind::Block,
            has_content: false,
            size: Viewport::new(width, height),
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ContainerKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_content(mut self) -> Self {
        self.has_content = true;
        self
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = Viewport::new(width, height);
    }
}

impl ChartContainer for HeadlessContainer {
    fn kind(&self) -> ContainerKind {
        self.kind.clone()
    }

    fn has_content(&self) -> bool {
        self.has_content
    }

    fn size(&self) -> Viewport {
        self.size
    }
}
