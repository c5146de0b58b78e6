/// Router Module Index
///
/// Routes are split by the credentials they require. Access to the admin
/// endpoints is decided by the policy table (see `handlers::authorize`), not
/// by the module they live in.

/// Routes accessible without a session. Handlers that take a `Viewer` still
/// tailor their answer to a session when one is presented.
pub mod public;

/// Routes protected by the `Session` extractor middleware.
pub mod authenticated;

/// Administrative routes, nested under `/admin`.
pub mod admin;
