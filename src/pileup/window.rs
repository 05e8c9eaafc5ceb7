use crate::pileup::PileupError;

/// Coordinate span rendered around a centre position.
///
/// Positions are 1-based and inclusive, matching the `chrom:pos` regions the
/// alignment viewer accepts. The span is padded by `extend` on both sides,
/// so `width = 2 * extend + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    contig: String,
    center: u64,
    extend: u64,
    start: u64,
    end: u64,
}

impl Window {
    /// Build the padded window around `center`.
    pub fn new(contig: impl Into<String>, center: u64, extend: u64) -> Result<Self, PileupError> {
        let contig = contig.into();
        if contig.is_empty() {
            return Err(PileupError::config("contig name must not be empty"));
        }
        let start = center
            .checked_sub(extend)
            .filter(|&start| start >= 1)
            .ok_or_else(|| {
                PileupError::config(format!(
                    "window {contig}:{center} extended by {extend} starts before position 1"
                ))
            })?;
        let end = center.checked_add(extend).ok_or_else(|| {
            PileupError::config(format!("window end overflows for {contig}:{center}+{extend}"))
        })?;
        usize::try_from(end - start + 1)
            .map_err(|_| PileupError::config(format!("window width {} is too large", end - start + 1)))?;

        Ok(Self {
            contig,
            center,
            extend,
            start,
            end,
        })
    }

    /// Contig the window lies on.
    pub fn contig(&self) -> &str {
        &self.contig
    }

    /// Unpadded centre position.
    pub fn center(&self) -> u64 {
        self.center
    }

    /// Padding applied on each side of the centre.
    pub fn extend(&self) -> u64 {
        self.extend
    }

    /// First position of the window.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Last position of the window.
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Number of text columns the viewer must emit for this window.
    pub fn width(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    /// Viewer region string (`contig:start`).
    pub fn region(&self) -> String {
        format!("{}:{}", self.contig, self.start)
    }
}

/// Convert a signed padding value, rejecting negatives.
pub fn checked_extend(extend: i64) -> Result<u64, PileupError> {
    u64::try_from(extend)
        .map_err(|_| PileupError::config(format!("extend must be non-negative, got {extend}")))
}

/// Convert a signed depth cap, rejecting negatives. Zero means unlimited.
pub fn checked_depth_cap(depth_cap: Option<i64>) -> Result<Option<usize>, PileupError> {
    depth_cap
        .map(|cap| {
            usize::try_from(cap)
                .map_err(|_| PileupError::config(format!("depth cap must be non-negative, got {cap}")))
        })
        .transpose()
}

/// Keep at most `depth_cap` read rows, always the earliest emitted ones.
///
/// `None` and `Some(0)` keep every row.
pub fn cap_depth<T>(reads: &[T], depth_cap: Option<usize>) -> &[T] {
    match depth_cap {
        Some(cap) if cap > 0 && cap < reads.len() => &reads[..cap],
        _ => reads,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_padded_on_both_sides() {
        let window = Window::new("chr1", 100, 5).unwrap();
        assert_eq!(window.start(), 95);
        assert_eq!(window.end(), 105);
        assert_eq!(window.width(), 11);
        assert_eq!(window.region(), "chr1:95");
    }

    #[test]
    fn zero_extend_is_a_single_column() {
        let window = Window::new("chr1", 7, 0).unwrap();
        assert_eq!(window.width(), 1);
    }

    #[test]
    fn window_before_first_position_is_rejected() {
        assert!(matches!(
            Window::new("chr1", 10, 10),
            Err(PileupError::Config(_))
        ));
        assert!(matches!(Window::new("chr1", 0, 0), Err(PileupError::Config(_))));
    }

    #[test]
    fn empty_contig_is_rejected() {
        assert!(matches!(Window::new("", 10, 1), Err(PileupError::Config(_))));
    }

    #[test]
    fn negative_inputs_are_config_errors() {
        assert!(matches!(checked_extend(-1), Err(PileupError::Config(_))));
        assert_eq!(checked_extend(50).unwrap(), 50);
        assert!(matches!(
            checked_depth_cap(Some(-3)),
            Err(PileupError::Config(_))
        ));
        assert_eq!(checked_depth_cap(None).unwrap(), None);
        assert_eq!(checked_depth_cap(Some(100)).unwrap(), Some(100));
    }

    #[test]
    fn depth_cap_keeps_earliest_rows() {
        let rows: Vec<usize> = (0..10).collect();
        assert_eq!(cap_depth(&rows, Some(3)), &[0, 1, 2]);
        assert_eq!(cap_depth(&rows, Some(0)).len(), 10);
        assert_eq!(cap_depth(&rows, None).len(), 10);
        assert_eq!(cap_depth(&rows, Some(50)).len(), 10);
    }
}
