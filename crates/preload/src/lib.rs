pub mod caption;
pub mod config;
pub mod dom;
pub mod issue;
pub mod lookup;
pub mod overlay;
pub mod route;
pub mod session;
pub mod stars;
pub mod subscription;
pub mod title;

pub use caption::*;
pub use config::*;
pub use dom::*;
pub use issue::*;
pub use lookup::*;
pub use overlay::*;
pub use route::*;
pub use session::*;
pub use stars::*;
pub use subscription::*;
pub use title::*;
