//! Typed data components attached to entities.
//!
//! A [`DataStore`] holds at most one component per concrete type. Each
//! component declares the capability views it can be read through (usually
//! trait objects); the store indexes the component under every view when it
//! is inserted, so retrieval by capability is a bucket lookup rather than an
//! assignability scan.
//!
//! Entities embed a [`DataSlot`], which creates its store lazily, and
//! implement [`DataOwner`] to get the full retrieval API.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use tessera_foundation::{Error, ErrorKind, Result};
use tracing::trace;

/// A typed value attachable to an entity.
pub trait Component: Any {
    /// Builds a default instance for on-demand creation.
    ///
    /// # Errors
    ///
    /// The default implementation fails with a component construction error;
    /// components that can be created on demand override it.
    fn construct() -> Result<Self>
    where
        Self: Sized,
    {
        Err(Error::component_construction(
            type_name::<Self>(),
            "no default construction path",
        ))
    }

    /// Declares the capability views this component can be retrieved through.
    ///
    /// Every component is always viewable as its own concrete type.
    fn views(_views: &mut Views<Self>)
    where
        Self: Sized,
    {
    }
}

type RefCast<U> = Box<dyn for<'a> Fn(&'a (dyn Any + 'static)) -> Option<&'a U>>;
type MutCast<U> = Box<dyn for<'a> Fn(&'a mut (dyn Any + 'static)) -> Option<&'a mut U>>;

/// Type-erased accessor from a stored component to one of its views.
struct View<U: ?Sized + 'static> {
    get: RefCast<U>,
    get_mut: MutCast<U>,
}

fn ref_cast<T: Any, U: ?Sized + 'static>(get: fn(&T) -> &U) -> RefCast<U> {
    fn hint<U: ?Sized + 'static, F>(f: F) -> F
    where
        F: for<'a> Fn(&'a (dyn Any + 'static)) -> Option<&'a U>,
    {
        f
    }
    Box::new(hint(move |any| any.downcast_ref::<T>().map(get)))
}

fn mut_cast<T: Any, U: ?Sized + 'static>(get_mut: fn(&mut T) -> &mut U) -> MutCast<U> {
    fn hint<U: ?Sized + 'static, F>(f: F) -> F
    where
        F: for<'a> Fn(&'a mut (dyn Any + 'static)) -> Option<&'a mut U>,
    {
        f
    }
    Box::new(hint(move |any| any.downcast_mut::<T>().map(get_mut)))
}

/// Collects the capability views of a component type at insertion time.
pub struct Views<T> {
    entries: Vec<(TypeId, Box<dyn Any>)>,
    _component: PhantomData<fn() -> T>,
}

impl<T: Component> Views<T> {
    fn new() -> Self {
        let mut views = Self {
            entries: Vec::new(),
            _component: PhantomData,
        };
        views.view::<T>(|c| c, |c| c);
        views
    }

    /// Makes the component retrievable as `U`.
    ///
    /// `U` is typically a trait object the component implements:
    ///
    /// ```ignore
    /// views.view::<dyn Restraint>(|s| s, |s| s);
    /// ```
    pub fn view<U: ?Sized + 'static>(
        &mut self,
        get: fn(&T) -> &U,
        get_mut: fn(&mut T) -> &mut U,
    ) -> &mut Self {
        let id = TypeId::of::<U>();
        if self.entries.iter().all(|(existing, _)| *existing != id) {
            let view = View::<U> {
                get: ref_cast(get),
                get_mut: mut_cast(get_mut),
            };
            self.entries.push((id, Box::new(view)));
        }
        self
    }
}

struct Slot {
    type_id: TypeId,
    type_name: &'static str,
    value: Box<dyn Any>,
    views: HashMap<TypeId, Box<dyn Any>>,
}

impl Slot {
    fn get<U: ?Sized + 'static>(&self) -> Option<&U> {
        let view = self.views.get(&TypeId::of::<U>())?.downcast_ref::<View<U>>()?;
        (view.get)(self.value.as_ref())
    }

    fn get_mut<U: ?Sized + 'static>(&mut self) -> Option<&mut U> {
        let view = self.views.get(&TypeId::of::<U>())?.downcast_ref::<View<U>>()?;
        (view.get_mut)(self.value.as_mut())
    }
}

/// Heterogeneous container holding at most one component per concrete type.
///
/// Components are kept in insertion order. Re-inserting a type overwrites the
/// value in place and keeps its original position.
#[derive(Default)]
pub struct DataStore {
    slots: Vec<Slot>,
    /// Concrete type -> slot index.
    by_type: HashMap<TypeId, usize>,
    /// View type -> slot indices in insertion order.
    by_view: HashMap<TypeId, Vec<usize>>,
}

impl DataStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no components are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns true if at least one component is stored.
    #[must_use]
    pub fn has_any(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Stores a component, returning the previous value of the same type.
    pub fn insert<T: Component>(&mut self, value: T) -> Option<T> {
        let type_id = TypeId::of::<T>();
        if let Some(&idx) = self.by_type.get(&type_id) {
            let boxed: Box<dyn Any> = Box::new(value);
            let previous = std::mem::replace(&mut self.slots[idx].value, boxed);
            return previous.downcast::<T>().ok().map(|b| *b);
        }

        let mut views = Views::<T>::new();
        T::views(&mut views);

        let idx = self.slots.len();
        for (view_id, _) in &views.entries {
            self.by_view.entry(*view_id).or_default().push(idx);
        }
        self.by_type.insert(type_id, idx);
        self.slots.push(Slot {
            type_id,
            type_name: type_name::<T>(),
            value: Box::new(value),
            views: views.entries.into_iter().collect(),
        });
        trace!(component = type_name::<T>(), "attached data component");
        None
    }

    /// Removes the component of concrete type `T`.
    pub fn remove<T: Component>(&mut self) -> Option<T> {
        let idx = self.by_type.get(&TypeId::of::<T>()).copied()?;
        let slot = self.slots.remove(idx);
        self.reindex();
        slot.value.downcast::<T>().ok().map(|b| *b)
    }

    /// Removes every component.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.by_type.clear();
        self.by_view.clear();
    }

    fn reindex(&mut self) {
        self.by_type.clear();
        self.by_view.clear();
        for (idx, slot) in self.slots.iter().enumerate() {
            self.by_type.insert(slot.type_id, idx);
            for view_id in slot.views.keys() {
                self.by_view.entry(*view_id).or_default().push(idx);
            }
        }
    }

    /// Returns true if a component of concrete type `T` is stored.
    #[must_use]
    pub fn has<T: Component>(&self) -> bool {
        self.by_type.contains_key(&TypeId::of::<T>())
    }

    /// Returns true if any stored component is viewable as `U`.
    #[must_use]
    pub fn has_view<U: ?Sized + 'static>(&self) -> bool {
        self.by_view
            .get(&TypeId::of::<U>())
            .is_some_and(|bucket| !bucket.is_empty())
    }

    /// Gets the component of concrete type `T`.
    #[must_use]
    pub fn get<T: Component>(&self) -> Option<&T> {
        let idx = *self.by_type.get(&TypeId::of::<T>())?;
        self.slots[idx].value.downcast_ref::<T>()
    }

    /// Gets the component of concrete type `T` mutably.
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        let idx = *self.by_type.get(&TypeId::of::<T>())?;
        self.slots[idx].value.downcast_mut::<T>()
    }

    /// Gets the component of type `T`, constructing and storing a default
    /// instance first if none exists.
    ///
    /// # Errors
    ///
    /// Returns a component construction error if `T` cannot be constructed
    /// on demand.
    pub fn get_or_create<T: Component>(&mut self) -> Result<&mut T> {
        if !self.has::<T>() {
            let value = T::construct()?;
            self.insert(value);
        }
        self.get_mut::<T>().ok_or_else(|| {
            Error::new(ErrorKind::Internal(format!(
                "component {} missing after insertion",
                type_name::<T>()
            )))
        })
    }

    /// Gets the first component, in insertion order, viewable as `U`.
    #[must_use]
    pub fn view<U: ?Sized + 'static>(&self) -> Option<&U> {
        let idx = *self.by_view.get(&TypeId::of::<U>())?.first()?;
        self.slots[idx].get::<U>()
    }

    /// Mutable form of [`view`](Self::view).
    pub fn view_mut<U: ?Sized + 'static>(&mut self) -> Option<&mut U> {
        let idx = *self.by_view.get(&TypeId::of::<U>())?.first()?;
        self.slots[idx].get_mut::<U>()
    }

    /// All components viewable as `U`, in insertion order.
    pub fn all<U: ?Sized + 'static>(&self) -> impl Iterator<Item = &U> + '_ {
        self.by_view
            .get(&TypeId::of::<U>())
            .into_iter()
            .flatten()
            .filter_map(|&idx| self.slots[idx].get::<U>())
    }

    /// Type names of the stored components, in insertion order.
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slots.iter().map(|slot| slot.type_name)
    }
}

impl fmt::Debug for DataStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.type_names()).finish()
    }
}

/// Lazily-created data store embedded in an entity.
#[derive(Default)]
pub struct DataSlot(Option<Box<DataStore>>);

impl DataSlot {
    /// Creates an empty slot. No store is allocated until first written.
    #[must_use]
    pub const fn new() -> Self {
        Self(None)
    }

    /// The store, if it has been created.
    #[must_use]
    pub fn get(&self) -> Option<&DataStore> {
        self.0.as_deref()
    }

    /// The store, if it has been created.
    pub fn get_mut(&mut self) -> Option<&mut DataStore> {
        self.0.as_deref_mut()
    }

    /// The store, creating it on first access.
    pub fn get_or_init(&mut self) -> &mut DataStore {
        self.0.get_or_insert_with(Box::default)
    }

    /// Returns true once the store has been created.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Debug for DataSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(store) => write!(f, "DataSlot({store:?})"),
            None => write!(f, "DataSlot(uninit)"),
        }
    }
}

/// An entity that owns attached data components.
///
/// Implementors only expose their [`DataSlot`]; the retrieval API is
/// provided. Read-only methods never create the store.
pub trait DataOwner {
    /// The entity's data slot.
    fn data_slot(&self) -> &DataSlot;

    /// The entity's data slot, mutably.
    fn data_slot_mut(&mut self) -> &mut DataSlot;

    /// Returns true if the store exists and holds at least one component.
    fn has_data(&self) -> bool {
        self.data_slot().get().is_some_and(|store| !store.is_empty())
    }

    /// Returns true if a component of concrete type `T` is attached.
    fn has_data_of<T: Component>(&self) -> bool {
        self.data_slot().get().is_some_and(DataStore::has::<T>)
    }

    /// Returns true if any attached component is viewable as `U`.
    fn has_data_as<U: ?Sized + 'static>(&self) -> bool {
        self.data_slot().get().is_some_and(DataStore::has_view::<U>)
    }

    /// The attached component of concrete type `T`, if any.
    fn data<T: Component>(&self) -> Option<&T> {
        self.data_slot().get()?.get::<T>()
    }

    /// The attached component of concrete type `T`, mutably.
    fn data_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.data_slot_mut().get_mut()?.get_mut::<T>()
    }

    /// The first attached component viewable as `U`, if any.
    fn data_as<U: ?Sized + 'static>(&self) -> Option<&U> {
        self.data_slot().get()?.view::<U>()
    }

    /// The attached component of type `T`, created on demand.
    ///
    /// # Errors
    ///
    /// Returns a component construction error if `T` cannot be constructed.
    fn data_or_create<T: Component>(&mut self) -> Result<&mut T> {
        self.data_slot_mut().get_or_init().get_or_create::<T>()
    }

    /// All attached components viewable as `U`, in insertion order.
    fn all_data<U: ?Sized + 'static>(&self) -> Vec<&U> {
        self.data_slot()
            .get()
            .map(|store| store.all::<U>().collect())
            .unwrap_or_default()
    }

    /// Attaches a component, returning any previous value of the same type.
    fn set_data<T: Component>(&mut self, value: T) -> Option<T> {
        self.data_slot_mut().get_or_init().insert(value)
    }

    /// Detaches and returns the component of concrete type `T`.
    fn remove_data<T: Component>(&mut self) -> Option<T> {
        self.data_slot_mut().get_mut()?.remove::<T>()
    }
}
