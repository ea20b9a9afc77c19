//! Leptos DragDrop Utilities
//!
//! Kanban-style drag-and-drop for Leptos using mouse events.
//! Cards live in columns identified by a caller-defined key; a drop reports
//! where the card came from and which column slot it was released over.
//! Uses movement threshold to distinguish click from drag.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Anything usable as a column identifier
pub trait ColumnKey: Clone + PartialEq + Send + Sync + 'static {}

impl<T: Clone + PartialEq + Send + Sync + 'static> ColumnKey for T {}

/// Where a card was picked up
#[derive(Clone, Debug, PartialEq)]
pub struct DragSource<K> {
    pub card_id: String,
    pub column: K,
    pub index: usize,
}

/// Column slot under the pointer. `index` is the insertion point.
#[derive(Clone, Debug, PartialEq)]
pub struct DropTarget<K> {
    pub column: K,
    pub index: usize,
}

impl<K: PartialEq> DropTarget<K> {
    /// True when releasing here leaves the card where it already is
    pub fn is_origin_of(&self, source: &DragSource<K>) -> bool {
        self.column == source.column && (self.index == source.index || self.index == source.index + 1)
    }
}

/// DnD state signals
pub struct DndSignals<K: ColumnKey> {
    pub dragging_read: ReadSignal<Option<DragSource<K>>>,
    pub dragging_write: WriteSignal<Option<DragSource<K>>>,
    pub drop_target_read: ReadSignal<Option<DropTarget<K>>>,
    pub drop_target_write: WriteSignal<Option<DropTarget<K>>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending card (mousedown but not yet dragging)
    pub pending_read: ReadSignal<Option<DragSource<K>>>,
    pub pending_write: WriteSignal<Option<DragSource<K>>>,
    /// Start position for movement detection
    pub start_read: ReadSignal<(i32, i32)>,
    pub start_write: WriteSignal<(i32, i32)>,
}

impl<K: ColumnKey> Clone for DndSignals<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: ColumnKey> Copy for DndSignals<K> {}

impl<K: ColumnKey> DndSignals<K> {
    pub fn is_dragging(&self, card_id: &str) -> bool {
        self.dragging_read
            .with(|d| d.as_ref().map_or(false, |s| s.card_id == card_id))
    }

    pub fn is_target_column(&self, column: &K) -> bool {
        self.drop_target_read
            .with(|t| t.as_ref().map_or(false, |t| &t.column == column))
    }

    pub fn drag_active(&self) -> bool {
        self.dragging_read.with(Option::is_some)
    }
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// Whether the pointer has moved far enough from `start` to count as a drag
pub fn passed_threshold(start: (i32, i32), current: (i32, i32)) -> bool {
    (current.0 - start.0).abs() > DRAG_THRESHOLD_PX || (current.1 - start.1).abs() > DRAG_THRESHOLD_PX
}

pub fn create_dnd_signals<K: ColumnKey>() -> DndSignals<K> {
    let (dragging_read, dragging_write) = signal(None::<DragSource<K>>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget<K>>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_read, pending_write) = signal(None::<DragSource<K>>);
    let (start_read, start_write) = signal((0i32, 0i32));
    DndSignals {
        dragging_read,
        dragging_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_read,
        pending_write,
        start_read,
        start_write,
    }
}

/// What a mouseup means for the card under it
#[derive(Clone, Debug, PartialEq)]
pub enum Release<K> {
    /// No drag was active: a plain click goes through
    Click,
    /// Drag released outside any column
    Cancelled,
    Dropped(DragSource<K>, DropTarget<K>),
}

impl<K> Release<K> {
    pub fn of(dragging: Option<DragSource<K>>, drop_target: Option<DropTarget<K>>) -> Self {
        match (dragging, drop_target) {
            (None, _) => Release::Click,
            (Some(_), None) => Release::Cancelled,
            (Some(source), Some(target)) => Release::Dropped(source, target),
        }
    }

    /// The click that follows this mouseup should be swallowed
    pub fn suppresses_click(&self) -> bool {
        !matches!(self, Release::Click)
    }
}

/// End drag operation. `was_dragging` = a drag had passed the threshold,
/// so the click fired by this release must not count as a card click.
pub fn end_drag<K: ColumnKey>(dnd: &DndSignals<K>, was_dragging: bool) {
    dnd.dragging_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_write.set(None);
    if !was_dragging {
        return;
    }
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

/// Create mousedown handler for a card.
/// Records pending drag with start position
pub fn make_on_card_mousedown<K: ColumnKey>(
    dnd: DndSignals<K>,
    source: DragSource<K>,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        // Ignore if target is a form control inside the card
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlSelectElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlAnchorElement>().is_some() { return; }
        }
        dnd.pending_write.set(Some(source.clone()));
        dnd.start_write.set((ev.client_x(), ev.client_y()));
    }
}

/// Create mousemove handler for document - starts drag if moved enough
fn bind_global_mousemove<K: ColumnKey>(dnd: DndSignals<K>) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        if dnd.dragging_read.with_untracked(Option::is_some) {
            return;
        }
        let Some(pending) = dnd.pending_read.get_untracked() else {
            return;
        };
        if passed_threshold(dnd.start_read.get_untracked(), (ev.client_x(), ev.client_y())) {
            dnd.dragging_write.set(Some(pending));
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        }
    }
    on_mousemove.forget();
}

/// Create mouseenter handler for a card: insert before it
pub fn make_on_card_mouseenter<K: ColumnKey>(
    dnd: DndSignals<K>,
    column: K,
    index: usize,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_read.with_untracked(Option::is_some) {
            dnd.drop_target_write.set(Some(DropTarget { column: column.clone(), index }));
        }
    }
}

/// Create mouseenter handler for a column body: append at the end
pub fn make_on_column_mouseenter<K: ColumnKey>(
    dnd: DndSignals<K>,
    column: K,
    len: impl Fn() -> usize + Clone + 'static,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_read.with_untracked(Option::is_some) {
            dnd.drop_target_write.set(Some(DropTarget { column: column.clone(), index: len() }));
        }
    }
}

/// Create mouseleave handler for a column
pub fn make_on_column_mouseleave<K: ColumnKey>(dnd: DndSignals<K>) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_read.with_untracked(Option::is_some) {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Bind global mouseup handler for drop detection.
///
/// `on_drop` runs only for a real drag released over a column.
pub fn bind_global_mouseup<K, F>(dnd: DndSignals<K>, on_drop: F)
where
    K: ColumnKey,
    F: Fn(DragSource<K>, DropTarget<K>) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let release = Release::of(dnd.dragging_read.get_untracked(), dnd.drop_target_read.get_untracked());
        end_drag(&dnd, release.suppresses_click());

        if let Release::Dropped(source, target) = release {
            on_drop(source, target);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        }
    }
    on_mouseup.forget();

    // Also bind global mousemove
    bind_global_mousemove(dnd);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(column: &'static str, index: usize) -> DragSource<&'static str> {
        DragSource { card_id: "T1".into(), column, index }
    }

    #[test]
    fn test_threshold() {
        assert!(!passed_threshold((10, 10), (15, 10)));
        assert!(passed_threshold((10, 10), (16, 10)));
        assert!(passed_threshold((10, 10), (10, 4)));
    }

    #[test]
    fn test_plain_click_is_not_swallowed() {
        let click = Release::<&str>::of(None, None);
        assert_eq!(click, Release::Click);
        assert!(!click.suppresses_click());

        // A stale target without an active drag is still a click
        let click = Release::of(None, Some(DropTarget { column: "Open", index: 0 }));
        assert!(!click.suppresses_click());
    }

    #[test]
    fn test_release_after_drag() {
        let cancelled = Release::of(Some(source("Open", 0)), None);
        assert_eq!(cancelled, Release::Cancelled);
        assert!(cancelled.suppresses_click());

        let target = DropTarget { column: "Closed", index: 1 };
        let dropped = Release::of(Some(source("Open", 0)), Some(target.clone()));
        assert_eq!(dropped, Release::Dropped(source("Open", 0), target));
        assert!(dropped.suppresses_click());
    }

    #[test]
    fn test_same_slot_is_origin() {
        let src = source("Open", 2);
        assert!(DropTarget { column: "Open", index: 2 }.is_origin_of(&src));
        // Directly after itself is the same position
        assert!(DropTarget { column: "Open", index: 3 }.is_origin_of(&src));
        assert!(!DropTarget { column: "Open", index: 0 }.is_origin_of(&src));
        assert!(!DropTarget { column: "Closed", index: 2 }.is_origin_of(&src));
    }
}
