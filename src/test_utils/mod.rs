pub mod repo_extensions;
pub mod stubs;

pub use repo_extensions::{
    create_test_repo, create_test_repo_without_identity, RepoAssertions, RepoTestOperations,
};
pub use stubs::{CallLog, FetchFailStub, PruneFailStub, RemoteStub};
