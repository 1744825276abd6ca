//! Memoized rendering.
//!
//! [`IconCache`] maps each descriptor to its rendered image. Entries are
//! created on first request and kept for the cache's lifetime; nothing is
//! evicted. Each key owns a [`OnceLock`] cell, so concurrent first requests
//! for the same descriptor render it exactly once while other keys render in
//! parallel. The map lock is held only long enough to find or insert a cell.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::descriptor::IconDescriptor;
use crate::icon::IconImage;
use crate::render::Renderer;

/// Anything that turns a descriptor into an image.
pub trait IconRenderer {
    fn render(&self, icon: &IconDescriptor) -> IconImage;
}

impl IconRenderer for Renderer {
    fn render(&self, icon: &IconDescriptor) -> IconImage {
        Renderer::render(self, icon)
    }
}

type Cell = Arc<OnceLock<Arc<IconImage>>>;

/// An unbounded descriptor → image cache.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ide_icons::{IconCache, IconDescriptor, Renderer, RendererProfile};
///
/// let renderer = Renderer::from_profile(&RendererProfile {
///     load_system_fonts: false,
///     ..RendererProfile::default()
/// });
/// let cache = IconCache::new(renderer);
///
/// let icon = IconDescriptor::system_image("list.bullet");
/// let first = cache.get_or_render(&icon);
/// let second = cache.get_or_render(&icon);
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
pub struct IconCache<R = Renderer> {
    renderer: R,
    entries: Mutex<HashMap<IconDescriptor, Cell>>,
}

impl<R: IconRenderer> IconCache<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Returns the cached image for `icon`, rendering it on first request.
    pub fn get_or_render(&self, icon: &IconDescriptor) -> Arc<IconImage> {
        let cell = {
            let mut entries = self.entries.lock();
            Arc::clone(entries.entry(icon.clone()).or_default())
        };

        Arc::clone(cell.get_or_init(|| {
            tracing::trace!(?icon, "rendering uncached icon");
            Arc::new(self.renderer.render(icon))
        }))
    }

    /// Number of descriptors requested so far.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drops every entry. Images already handed out stay valid.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl<R> std::fmt::Debug for IconCache<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IconCache")
            .field("entries", &self.entries.lock().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::time::Duration;

    use image::RgbaImage;

    use crate::color::IconColor;

    #[derive(Default)]
    struct CountingRenderer {
        calls: AtomicUsize,
        delay: Option<Duration>,
    }

    impl IconRenderer for CountingRenderer {
        fn render(&self, icon: &IconDescriptor) -> IconImage {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                std::thread::sleep(delay);
            }
            let px = icon.size.round() as u32;
            IconImage::new_full_content(RgbaImage::new(px, px), 1.0)
        }
    }

    #[test]
    fn renders_once_per_descriptor() {
        let cache = IconCache::new(CountingRenderer::default());
        let icon = IconDescriptor::text("C");

        let first = cache.get_or_render(&icon);
        let second = cache.get_or_render(&icon.clone());

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.renderer().calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn distinct_descriptors_render_separately() {
        let cache = IconCache::new(CountingRenderer::default());
        let icon = IconDescriptor::text("C");

        cache.get_or_render(&icon);
        cache.get_or_render(&icon.clone().with_color(IconColor::Red));
        cache.get_or_render(&icon.clone().with_size(32.0));

        assert_eq!(cache.renderer().calls.load(Ordering::SeqCst), 3);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn concurrent_first_requests_render_once() {
        let cache = IconCache::new(CountingRenderer {
            delay: Some(Duration::from_millis(20)),
            ..CountingRenderer::default()
        });
        let icon = IconDescriptor::system_image("list.bullet");
        let barrier = Barrier::new(8);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    barrier.wait();
                    cache.get_or_render(&icon);
                });
            }
        });

        assert_eq!(cache.renderer().calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clear_forgets_entries() {
        let cache = IconCache::new(CountingRenderer::default());
        let icon = IconDescriptor::text("C");

        let kept = cache.get_or_render(&icon);
        cache.clear();
        assert!(cache.is_empty());

        cache.get_or_render(&icon);
        assert_eq!(cache.renderer().calls.load(Ordering::SeqCst), 2);
        assert_eq!(kept.data.dimensions(), (16, 16));
    }

    #[test]
    fn caches_real_renders() {
        let renderer = Renderer::from_profile(&crate::profile::RendererProfile {
            load_system_fonts: false,
            ..Default::default()
        });
        let cache = IconCache::new(renderer);
        let icon = IconDescriptor::system_image("puzzlepiece.fill");
        assert_eq!(cache.get_or_render(&icon).data, cache.renderer().render(&icon).data);
    }
}
