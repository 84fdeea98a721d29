pub mod compare;
pub mod error;
pub mod map;
pub mod node;
pub mod treap_rk;
pub mod verify;
pub use compare::{ByKey, Compare, FnCompare, Natural, Reverse};
pub use error::TreapError;
pub use map::RankMap;
pub use node::{rotate_to_left, rotate_to_right, Node};
pub use treap_rk::TreapRk;
