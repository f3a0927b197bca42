/// Source of collision-resistant suffixes for scratch directories and
/// download files, injectable so tests get deterministic names.
pub trait IdSource {
    fn next_id(&self) -> String;
}

/// Random 64-bit hex ids. The space is large enough that a clash with a
/// leftover directory from an earlier job is not a practical concern.
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&self) -> String {
        format!("{:016x}", rand::random::<u64>())
    }
}
