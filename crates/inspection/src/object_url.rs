use crate::media::ImageData;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Registry {
    next_id: u64,
    live: HashSet<String>,
}

/// Issues temporary `blob:` references for images shown on the page.
///
/// Every reference is owned by an [`ImageHandle`] and released when the
/// handle is dropped.
#[derive(Clone, Default)]
pub struct ObjectUrlRegistry {
    inner: Arc<Mutex<Registry>>,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, image: ImageData) -> ImageHandle {
        let url = {
            let mut registry = self.lock();
            registry.next_id += 1;
            let url = format!("blob:inspection/{}", registry.next_id);
            registry.live.insert(url.clone());
            url
        };

        tracing::trace!(url = %url, file = image.file_name(), "Object URL created");

        ImageHandle {
            url,
            image,
            registry: self.clone(),
        }
    }

    pub fn live_count(&self) -> usize {
        self.lock().live.len()
    }

    pub fn is_live(&self, url: &str) -> bool {
        self.lock().live.contains(url)
    }

    fn release(&self, url: &str) {
        if self.lock().live.remove(url) {
            tracing::trace!(url = %url, "Object URL released");
        }
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// An image together with the temporary URL it is displayed under.
pub struct ImageHandle {
    url: String,
    image: ImageData,
    registry: ObjectUrlRegistry,
}

impl ImageHandle {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn image(&self) -> &ImageData {
        &self.image
    }
}

impl std::fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageHandle")
            .field("url", &self.url)
            .field("file_name", &self.image.file_name())
            .finish()
    }
}

impl Drop for ImageHandle {
    fn drop(&mut self) {
        self.registry.release(&self.url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> ImageData {
        ImageData::new(name, "image/jpeg", vec![0u8; 4])
    }

    #[test]
    fn urls_are_unique() {
        let registry = ObjectUrlRegistry::new();
        let a = registry.create(image("a.jpg"));
        let b = registry.create(image("b.jpg"));

        assert_ne!(a.url(), b.url());
        assert_eq!(registry.live_count(), 2);
    }

    #[test]
    fn dropping_handle_releases_url() {
        let registry = ObjectUrlRegistry::new();
        let handle = registry.create(image("a.jpg"));
        let url = handle.url().to_string();
        assert!(registry.is_live(&url));

        drop(handle);

        assert!(!registry.is_live(&url));
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn replacing_a_handle_releases_the_old_one() {
        let registry = ObjectUrlRegistry::new();
        let mut current = Some(registry.create(image("a.jpg")));
        let first = current.as_ref().map(|h| h.url().to_string()).unwrap();

        current = Some(registry.create(image("b.jpg")));

        assert!(!registry.is_live(&first));
        assert_eq!(registry.live_count(), 1);
        assert_eq!(current.unwrap().image().file_name(), "b.jpg");
    }
}
