pub mod commit;

pub use commit::{handle_commit, Collaborators, CommitOptions};
