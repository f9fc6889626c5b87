/// Aggregated view of round progress, useful for hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}
