pub mod workbook;
pub mod viewport;
pub mod tableview;
pub mod selection;
pub mod search;

pub use workbook::{Cell, Sheet, Workbook};
pub use viewport::Position;
pub use tableview::TableView;
pub use selection::{Selection, SelectionRect};
pub use search::{Direction, SearchIndex};
