//! Units - The demo tree: root owns parent owns child.
//!
//! Data flows top-down as props (root init value -> parent counter ->
//! doubled child value); intent flows bottom-up through callbacks (the
//! child's reset request).

pub mod child;
pub mod parent;
pub mod root;

pub use child::{ChildProps, ChildState, ChildUnit};
pub use parent::{
    INITIAL_MESSAGE, MESSAGE_DELAY, MOUNTED_MESSAGE, ParentProps, ParentState, ParentUnit,
};
pub use root::{RootState, RootUnit};
