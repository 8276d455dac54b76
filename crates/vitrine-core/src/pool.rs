use vitrine_platform::ElementId;

/// The image picked for one stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSlot {
    pub image: ElementId,
    pub index: usize,
    pub z_index: u32,
}

/// Fixed set of image handles used round-robin, with a stacking counter so
/// the newest stamp always paints on top.
#[derive(Debug, Clone)]
pub struct ImagePool {
    images: Vec<ElementId>,
    cursor: usize,
    z_index: u32,
}

impl ImagePool {
    pub fn new(images: Vec<ElementId>) -> Self {
        Self {
            images,
            cursor: 0,
            z_index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn images(&self) -> &[ElementId] {
        &self.images
    }

    /// Index the next stamp will use.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn z_index(&self) -> u32 {
        self.z_index
    }

    /// Take the image under the cursor, raise the stacking counter and
    /// advance. `None` on an empty pool.
    pub fn next_slot(&mut self) -> Option<PoolSlot> {
        let image = *self.images.get(self.cursor)?;
        self.z_index = self.z_index.saturating_add(1);
        let slot = PoolSlot {
            image,
            index: self.cursor,
            z_index: self.z_index,
        };
        self.cursor = (self.cursor + 1) % self.images.len();
        Some(slot)
    }
}
