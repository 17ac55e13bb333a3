//! Process-wide cache of built type descriptors.

use super::descriptor::{Describe, TypeDescriptor};
use dashmap::{DashMap, mapref::entry::Entry};
use once_cell::sync::Lazy;
use std::any::{Any, TypeId};
use tracing::debug;

type Erased = &'static (dyn Any + Send + Sync);

static DESCRIPTORS: Lazy<DashMap<TypeId, Erased>> = Lazy::new(DashMap::new);

/// Descriptor for `T`, built on first request.
///
/// Building happens outside the map's locks so a `describe` that is slow, or
/// that races another thread, never blocks unrelated lookups. When two threads
/// race, the first insert wins and the other build is dropped.
pub(crate) fn descriptor_of<T: Describe>() -> &'static TypeDescriptor<T> {
    let id = TypeId::of::<T>();

    let erased = match DESCRIPTORS.get(&id).map(|entry| *entry) {
        Some(found) => found,
        None => {
            let built = T::describe();
            match DESCRIPTORS.entry(id) {
                Entry::Occupied(existing) => *existing.get(),
                Entry::Vacant(slot) => {
                    debug!(
                        type_name = built.name(),
                        fields = built.fields().len(),
                        "registered type descriptor"
                    );
                    let leaked: Erased = Box::leak(Box::new(built));
                    *slot.insert(leaked)
                }
            }
        }
    };

    // entries are only ever inserted under the TypeId of their own type
    match erased.downcast_ref::<TypeDescriptor<T>>() {
        Some(descriptor) => descriptor,
        None => unreachable!("descriptor registered under a foreign TypeId"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Probe {
        value: i64,
    }

    impl Describe for Probe {
        fn describe() -> TypeDescriptor<Self> {
            TypeDescriptor::builder("Probe")
                .scalar("value", |p: &mut Self, v| p.value = v)
                .build()
        }
    }

    #[test]
    fn test_descriptor_is_built_once() {
        let first = descriptor_of::<Probe>();
        let second = descriptor_of::<Probe>();

        assert!(std::ptr::eq(first, second));
        assert_eq!(first.name(), "Probe");
        assert!(!DESCRIPTORS.is_empty());
    }

    #[test]
    fn test_concurrent_first_use_yields_one_descriptor() {
        #[derive(Debug, Default)]
        struct Raced;

        impl Describe for Raced {
            fn describe() -> TypeDescriptor<Self> {
                TypeDescriptor::builder("Raced").ignore("anything").build()
            }
        }

        let addresses: Vec<usize> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| std::ptr::from_ref(Raced::descriptor()) as usize))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
    }
}
