// Route handlers, one per (resource, verb) pair. All of them except
// `health` sit behind the API key layer installed in `app`.

pub mod admin;
pub mod health;
pub mod homeowners;
pub mod homes;
pub mod input;
pub mod users;
