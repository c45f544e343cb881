/// A value that exposes a named accessor usable by [`objects_map`].
pub trait KeyedObject {
    type Key;

    fn key(&self) -> Self::Key;
}

/// Collects the accessor of every object, in order.
pub fn objects_map<'a, T, R, F>(objects: impl IntoIterator<Item = &'a T>, accessor: F) -> Vec<R>
where
    T: 'a + ?Sized,
    F: FnMut(&'a T) -> R,
{
    objects.into_iter().map(accessor).collect()
}

/// [`objects_map`] over the [`KeyedObject::key`] of each object.
pub fn objects_keys<'a, T>(objects: impl IntoIterator<Item = &'a T>) -> Vec<T::Key>
where
    T: KeyedObject + 'a,
{
    objects_map(objects, T::key)
}
