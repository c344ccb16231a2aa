/// Traditional LIMIT/OFFSET row windowing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Limit {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}
