pub mod intrusive_list;
pub mod ordered_map;
pub mod slot_arena;

pub use intrusive_list::IntrusiveList;
pub use ordered_map::OrderedMap;
pub use slot_arena::{SlotArena, SlotId};
