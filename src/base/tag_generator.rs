/// Identifies nodes, materials, and elements within an analysis engine
pub type Tag = usize;

/// Generates unique tags for a single model build
///
/// Each build owns its generator; thus, independent builds never share counters.
#[derive(Clone, Debug, Default)]
pub struct TagGenerator {
    counter: Tag,
}

impl TagGenerator {
    /// Allocates a new instance; the first tag is 1
    pub fn new() -> Self {
        TagGenerator { counter: 0 }
    }

    /// Returns the next tag
    pub fn next_tag(&mut self) -> Tag {
        self.counter += 1;
        self.counter
    }

    /// Returns the number of tags generated so far
    pub fn count(&self) -> usize {
        self.counter
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
