//! Mixed-radix addressing of the combination space.

use fairslot_core::{ComboIndex, ComboPosition, FairslotError, Result};

/// Maps between a `comboIndex` and per-round option indices.
///
/// Round 0 is the most significant digit; each digit's radix is that round's
/// option count.
///
/// # Example
///
/// ```
/// use fairslot_solver::codec::ComboCodec;
///
/// let codec = ComboCodec::new(&[3, 4, 5]).unwrap();
/// assert_eq!(codec.total_combinations(), 60);
/// assert_eq!(codec.indices_from_combo_index(23).unwrap(), vec![1, 0, 3]);
/// assert_eq!(codec.combo_index_from_indices(&[1, 0, 3]).unwrap(), 23);
/// ```
#[derive(Debug, Clone)]
pub struct ComboCodec {
    radices: Vec<usize>,
    // strides[r] = product of radices after r
    strides: Vec<u64>,
    total: u64,
}

impl ComboCodec {
    /// Builds a codec, failing if a round is empty or the product overflows.
    pub fn new(option_counts: &[usize]) -> Result<Self> {
        if let Some(round) = option_counts.iter().position(|&c| c == 0) {
            return Err(FairslotError::NoValidOptions { round });
        }

        let mut strides = vec![1u64; option_counts.len()];
        let mut total = 1u64;
        for (round, &count) in option_counts.iter().enumerate().rev() {
            strides[round] = total;
            total = total.checked_mul(count as u64).ok_or_else(|| {
                FairslotError::Overflow(format!(
                    "combination count exceeds u64 at round {round} (option counts {option_counts:?})"
                ))
            })?;
        }

        Ok(Self {
            radices: option_counts.to_vec(),
            strides,
            total,
        })
    }

    pub fn total_combinations(&self) -> u64 {
        self.total
    }

    pub fn radices(&self) -> &[usize] {
        &self.radices
    }

    pub fn round_count(&self) -> usize {
        self.radices.len()
    }

    pub fn indices_from_combo_index(&self, combo_index: ComboIndex) -> Result<Vec<usize>> {
        let mut indices = vec![0; self.radices.len()];
        self.decode_into(combo_index, &mut indices)?;
        Ok(indices)
    }

    /// Decodes into an existing buffer of length `round_count()`.
    pub fn decode_into(&self, combo_index: ComboIndex, indices: &mut [usize]) -> Result<()> {
        if combo_index >= self.total {
            return Err(FairslotError::ComboOutOfRange(format!(
                "combo index {combo_index} is not below {}",
                self.total
            )));
        }
        if indices.len() != self.radices.len() {
            return Err(FairslotError::ComboOutOfRange(format!(
                "expected {} rounds, got {}",
                self.radices.len(),
                indices.len()
            )));
        }

        let mut rest = combo_index;
        for (slot, &radix) in indices.iter_mut().zip(&self.radices).rev() {
            let radix = radix as u64;
            *slot = (rest % radix) as usize;
            rest /= radix;
        }
        Ok(())
    }

    pub fn combo_index_from_indices(&self, indices: &[usize]) -> Result<ComboIndex> {
        self.check_indices(indices)?;
        let mut combo_index = 0u64;
        for (&index, &stride) in indices.iter().zip(&self.strides) {
            combo_index = (index as u64)
                .checked_mul(stride)
                .and_then(|term| combo_index.checked_add(term))
                .ok_or_else(|| {
                    FairslotError::Overflow(format!("combo index of {indices:?} exceeds u64"))
                })?;
        }
        Ok(combo_index)
    }

    /// Resolves a resume or seed position to its `comboIndex`.
    pub fn resolve(&self, position: &ComboPosition) -> Result<ComboIndex> {
        match position {
            ComboPosition::Index(index) => {
                if *index >= self.total {
                    return Err(FairslotError::ComboOutOfRange(format!(
                        "combo index {index} is not below {}",
                        self.total
                    )));
                }
                Ok(*index)
            }
            ComboPosition::Indices(indices) => self.combo_index_from_indices(indices),
        }
    }

    /// Resolves a position to per-round option indices.
    pub fn position_indices(&self, position: &ComboPosition) -> Result<Vec<usize>> {
        match position {
            ComboPosition::Index(index) => self.indices_from_combo_index(*index),
            ComboPosition::Indices(indices) => {
                self.check_indices(indices)?;
                Ok(indices.clone())
            }
        }
    }

    /// Advances `indices` to the next combination, last round fastest.
    ///
    /// Returns `false` after wrapping past the final combination.
    pub fn increment(&self, indices: &mut [usize]) -> bool {
        for (index, &radix) in indices.iter_mut().zip(&self.radices).rev() {
            *index += 1;
            if *index < radix {
                return true;
            }
            *index = 0;
        }
        false
    }

    fn check_indices(&self, indices: &[usize]) -> Result<()> {
        if indices.len() != self.radices.len() {
            return Err(FairslotError::ComboOutOfRange(format!(
                "expected {} rounds, got {}",
                self.radices.len(),
                indices.len()
            )));
        }
        if let Some(round) = indices
            .iter()
            .zip(&self.radices)
            .position(|(&index, &radix)| index >= radix)
        {
            return Err(FairslotError::ComboOutOfRange(format!(
                "round {round} has {} options, index {} requested",
                self.radices[round], indices[round]
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bijection_over_whole_space() {
        let codec = ComboCodec::new(&[2, 3, 1, 4]).unwrap();
        let mut odometer = vec![0; 4];
        for combo_index in 0..codec.total_combinations() {
            let indices = codec.indices_from_combo_index(combo_index).unwrap();
            assert_eq!(indices, odometer, "index {combo_index}");
            assert_eq!(codec.combo_index_from_indices(&indices).unwrap(), combo_index);
            let more = codec.increment(&mut odometer);
            assert_eq!(more, combo_index + 1 < codec.total_combinations());
        }
        assert_eq!(odometer, vec![0; 4]);
    }

    #[test]
    fn test_round_zero_most_significant() {
        let codec = ComboCodec::new(&[10, 10, 10]).unwrap();
        assert_eq!(codec.indices_from_combo_index(472).unwrap(), vec![4, 7, 2]);
    }

    #[test]
    fn test_overflow_detected() {
        let counts = vec![1 << 16; 4];
        assert!(matches!(
            ComboCodec::new(&counts),
            Err(FairslotError::Overflow(_))
        ));

        let codec = ComboCodec::new(&[1 << 16; 3]).unwrap();
        assert_eq!(codec.total_combinations(), 1 << 48);
    }

    #[test]
    fn test_empty_round_rejected() {
        assert!(matches!(
            ComboCodec::new(&[3, 0, 2]),
            Err(FairslotError::NoValidOptions { round: 1 })
        ));
    }

    #[test]
    fn test_out_of_range() {
        let codec = ComboCodec::new(&[2, 3]).unwrap();
        assert!(matches!(
            codec.indices_from_combo_index(6),
            Err(FairslotError::ComboOutOfRange(_))
        ));
        assert!(matches!(
            codec.combo_index_from_indices(&[1, 3]),
            Err(FairslotError::ComboOutOfRange(_))
        ));
        assert!(matches!(
            codec.combo_index_from_indices(&[1]),
            Err(FairslotError::ComboOutOfRange(_))
        ));
        let mut short = [0usize; 1];
        assert!(codec.decode_into(0, &mut short).is_err());
    }

    #[test]
    fn test_resolve_positions() {
        let codec = ComboCodec::new(&[2, 3, 4]).unwrap();
        assert_eq!(codec.resolve(&ComboPosition::Index(17)).unwrap(), 17);
        assert_eq!(
            codec.resolve(&ComboPosition::Indices(vec![1, 1, 1])).unwrap(),
            17
        );
        assert_eq!(
            codec.position_indices(&ComboPosition::Index(17)).unwrap(),
            vec![1, 1, 1]
        );
        assert!(codec.resolve(&ComboPosition::Index(24)).is_err());
        assert!(codec
            .position_indices(&ComboPosition::Indices(vec![2, 0, 0]))
            .is_err());
    }

    #[test]
    fn test_no_rounds() {
        let codec = ComboCodec::new(&[]).unwrap();
        assert_eq!(codec.total_combinations(), 1);
        assert_eq!(codec.indices_from_combo_index(0).unwrap(), Vec::<usize>::new());
        assert!(!codec.increment(&mut []));
    }
}
