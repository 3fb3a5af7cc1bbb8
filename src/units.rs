#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub usize);

/// World-space edge length of one grid cell.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct CellSize(pub f32);
