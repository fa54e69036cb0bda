// Common test utilities and fixtures


// Re-export commonly used items
// Note: These may appear unused in some test binaries
#[allow(unused_imports)]
pub use fake_api::{FakeApi, Reply};
#[allow(unused_imports)]
pub use helpers::{customer, file_session, logged_in_session, memory_session, settled};
