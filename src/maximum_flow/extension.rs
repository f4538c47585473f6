/// A record that may stand for some entity of the input graph.
pub trait Extension {
    type Prototype: Copy;

    // None for records created with `create_detached`
    fn prototype(&self) -> Option<Self::Prototype>;
}

/// Factory-driven pool of records keyed by the dense index of a vertex or an edge.
///
/// Records live in an arena and are referred to by their record id, so records can point at
/// each other by id. Keys are mapped to record ids through a dense table.
pub struct ExtensionPool<T> {
    factory: Box<dyn Fn() -> T>,
    records: Vec<T>,
    slots: Vec<usize>,
}

impl<T: Extension> ExtensionPool<T> {
    pub fn new(factory: impl Fn() -> T + 'static) -> Self {
        Self { factory: Box::new(factory), records: Vec::new(), slots: Vec::new() }
    }

    /// Returns the record id for `key`, creating the record on first access.
    pub fn get(&mut self, key: usize) -> usize {
        if key >= self.slots.len() {
            self.slots.resize(key + 1, usize::MAX);
        }
        if self.slots[key] == usize::MAX {
            self.slots[key] = self.create_detached();
        }
        self.slots[key]
    }

    pub fn find(&self, key: usize) -> Option<usize> {
        self.slots.get(key).copied().filter(|&id| id != usize::MAX)
    }

    /// Creates a record which is not associated with any key.
    pub fn create_detached(&mut self) -> usize {
        self.records.push((self.factory)());
        self.records.len() - 1
    }

    #[inline]
    pub fn record(&self, id: usize) -> &T {
        &self.records[id]
    }

    #[inline]
    pub fn record_mut(&mut self, id: usize) -> &mut T {
        &mut self.records[id]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }
}
