/// Ordered catalog of all known organ class names.
///
/// A label volume stores the catalog index of each voxel's class, so the
/// position of a name in this list is its voxel value. The catalog is an
/// explicit immutable value passed into the mask extractor; there is no
/// process-wide default.
#[derive(Debug, Clone)]
pub struct OrganCatalog {
    names: Vec<String>,
}

impl OrganCatalog {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Catalog index of `name`, or `None` if the name is unknown.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
