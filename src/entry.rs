//! Default factory and entry point functions

use crate::builder::DceDomain;
use crate::error::Error;
use crate::factory::UuidFactory;
use crate::provider::{RandomNodeProvider, SystemClock};
use crate::uuid::Uuid;
use rand::rngs::ThreadRng;
use std::cell::RefCell;

type DefaultFactory = UuidFactory<ThreadRng, SystemClock, RandomNodeProvider<ThreadRng>>;

thread_local! {
    static DEFAULT_FACTORY: RefCell<DefaultFactory> = RefCell::new(new_default_factory());
}

fn new_default_factory() -> DefaultFactory {
    UuidFactory::with_collaborators(
        rand::thread_rng(),
        SystemClock,
        RandomNodeProvider::new(rand::thread_rng()),
    )
}

fn with_default_factory<V>(f: impl FnOnce(&mut DefaultFactory) -> V) -> V {
    DEFAULT_FACTORY.with(|g| {
        if unix_fork_safety::reseed_thread_rng_upon_pid_change() {
            g.replace(new_default_factory());
        }

        f(&mut g.borrow_mut())
    })
}

/// Creates a version 1 (Gregorian time) identifier with a random node and
/// clock sequence.
///
/// This function employs a thread-local factory. On Unix, it reseeds the
/// underlying generator when the process ID changes (i.e. upon process
/// forks) to prevent collisions across processes.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid128::uuid1()?;
/// println!("{uuid}"); // e.g., "ff6f8cb0-c57d-11e1-9b21-0800200c9a66"
/// # Ok::<(), uuid128::Error>(())
/// ```
pub fn uuid1() -> Result<Uuid, Error> {
    with_default_factory(|g| g.uuid1())
}

/// Creates a version 2 (DCE Security) identifier for `domain`, embedding
/// `local_identifier`.
pub fn uuid2(domain: DceDomain, local_identifier: u32) -> Result<Uuid, Error> {
    with_default_factory(|g| g.uuid2(domain, local_identifier))
}

/// Creates a version 3 (MD5 name-based) identifier.
///
/// # Examples
///
/// ```rust
/// use uuid128::{uuid3, Uuid};
///
/// let uuid = uuid3(Uuid::NAMESPACE_DNS, b"python.org");
/// assert_eq!(uuid.to_string(), "6fa459ea-ee8a-3ca4-894e-db77e160355e");
/// ```
pub fn uuid3(namespace: Uuid, name: &[u8]) -> Uuid {
    crate::factory::name_based::<md5::Md5>(crate::fields::Version::HashMd5, namespace, name)
}

/// Creates a version 4 (random) identifier.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid128::uuid4()?;
/// println!("{uuid}"); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// # Ok::<(), uuid128::Error>(())
/// ```
pub fn uuid4() -> Result<Uuid, Error> {
    with_default_factory(|g| g.uuid4())
}

/// Creates a version 5 (SHA-1 name-based) identifier.
///
/// # Examples
///
/// ```rust
/// use uuid128::{uuid5, Uuid};
///
/// let uuid = uuid5(Uuid::NAMESPACE_DNS, b"python.org");
/// assert_eq!(uuid.to_string(), "886313e1-3b8a-5372-9b90-0c9aee199e5d");
/// ```
pub fn uuid5(namespace: Uuid, name: &[u8]) -> Uuid {
    crate::factory::name_based::<sha1::Sha1>(crate::fields::Version::HashSha1, namespace, name)
}

/// Creates a version 6 (reordered time) identifier.
pub fn uuid6() -> Result<Uuid, Error> {
    with_default_factory(|g| g.uuid6())
}

/// Creates a version 7 (Unix time) identifier.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid128::uuid7()?;
/// println!("{uuid}"); // e.g., "01809424-3e59-7c05-9219-566f82fff672"
/// # Ok::<(), uuid128::Error>(())
/// ```
pub fn uuid7() -> Result<Uuid, Error> {
    with_default_factory(|g| g.uuid7())
}

/// Creates a version 8 (custom) identifier from `payload`.
pub fn uuid8(payload: [u8; 16]) -> Uuid {
    with_default_factory(|g| g.uuid8(payload))
}

#[cfg(unix)]
mod unix_fork_safety {
    use std::{cell::Cell, process};

    thread_local! {
        static PID: Cell<u32> = Cell::new(process::id());
    }

    /// Reseeds ThreadRng immediately when the process ID changes (i.e. upon
    /// process forks), returning true if ThreadRng is reseeded or false
    /// otherwise.
    pub fn reseed_thread_rng_upon_pid_change() -> bool {
        PID.with(|last_pid| {
            let pid = process::id();
            if pid == last_pid.replace(pid) {
                false
            } else {
                // As of rand v0.8.5 and rand_chacha v0.3.1, up to 63 `u32` values have to be used
                // before reseeding after a fork. Note that the `rand::rngs::adapter::ReseedingRng`
                // doc is wrong as of rand v0.8.5 as it describes the rand_chacha v0.1 behavior.
                // See https://github.com/rust-random/rand/pull/1317
                let _: [[u32; 32]; 2] = rand::random();
                true
            }
        })
    }
}

#[cfg(not(unix))]
mod unix_fork_safety {
    pub const fn reseed_thread_rng_upon_pid_change() -> bool {
        false
    }
}
