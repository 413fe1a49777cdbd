/// One entry of a parsed format mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// An input slot (`x` or `X` in the mask).
    Field {
        /// Character offset within the mask.
        position: usize,
        /// Dense index among fields, left to right.
        index: usize,
    },
    /// A literal character rendered between fields.
    Separator { position: usize, ch: char },
}

/// Field layout derived from a format mask such as `"xxx-xxx"`.
///
/// Parsing never fails: an empty or all-separator mask simply has no fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormatSpec {
    segments: Vec<Segment>,
    total_fields: usize,
}

impl FormatSpec {
    pub fn parse(format: &str) -> Self {
        let mut segments = Vec::with_capacity(format.len());
        let mut next_index = 0;

        for (position, ch) in format.chars().enumerate() {
            if ch == 'x' || ch == 'X' {
                segments.push(Segment::Field {
                    position,
                    index: next_index,
                });
                next_index += 1;
            } else {
                segments.push(Segment::Separator { position, ch });
            }
        }

        Self {
            segments,
            total_fields: next_index,
        }
    }

    pub fn total_fields(&self) -> usize {
        self.total_fields
    }

    pub fn is_empty(&self) -> bool {
        self.total_fields == 0
    }

    /// Segments in mask order, fields and separators interleaved.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// `(position, index)` pairs for every field.
    pub fn fields(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.segments.iter().filter_map(|s| match *s {
            Segment::Field { position, index } => Some((position, index)),
            Segment::Separator { .. } => None,
        })
    }

    /// `(position, ch)` pairs for every separator.
    pub fn separators(&self) -> impl Iterator<Item = (usize, char)> + '_ {
        self.segments.iter().filter_map(|s| match *s {
            Segment::Separator { position, ch } => Some((position, ch)),
            Segment::Field { .. } => None,
        })
    }

    pub fn last_field(&self) -> Option<usize> {
        self.total_fields.checked_sub(1)
    }
}
