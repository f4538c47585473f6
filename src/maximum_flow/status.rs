#[derive(Default, PartialEq, Eq, Debug, Clone, Copy)]
pub enum Status {
    #[default]
    Uninitialized,
    Built,
    Finalized,
}
