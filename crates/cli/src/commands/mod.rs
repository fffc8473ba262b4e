pub mod init;
pub mod list;
pub mod scan;
pub mod select;

pub use init::init_command;
pub use list::list_command;
pub use scan::scan_command;
pub use select::select_command;
