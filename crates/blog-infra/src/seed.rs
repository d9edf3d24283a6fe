//! Synthetic post generation for seeding a store.
//!
//! The generator is injected through [`PostFactory`] so tests can swap the
//! random source for a deterministic one.

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use blog_core::domain::{Author, BlogPost, NewPost};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Claude", "Dennis", "Edsger", "Frances", "Grace", "Hedy", "John",
    "Katherine", "Ken", "Linus", "Margaret", "Niklaus", "Radia", "Tony", "Yukihiro",
];

const LAST_NAMES: &[&str] = &[
    "Allen", "Backus", "Dijkstra", "Hamilton", "Hopper", "Johnson", "Kernighan", "Knuth",
    "Lamarr", "Liskov", "Lovelace", "Matsumoto", "Perlman", "Ritchie", "Shannon", "Thompson",
    "Turing", "Wirth",
];

const WORDS: &[&str] = &[
    "analysis", "bandwidth", "cache", "compiler", "daemon", "engine", "firmware", "garden",
    "harbor", "interface", "journey", "kernel", "lantern", "matrix", "network", "orbit",
    "protocol", "quartz", "river", "signal", "thread", "utility", "vector", "window", "yield",
    "zenith",
];

/// Produces valid, not yet stored, posts.
pub trait PostFactory {
    fn generate(&mut self) -> NewPost;
}

/// Random names, a few random words for title and content, and a creation
/// time within the last day.
pub struct RandomPostFactory<R: Rng> {
    rng: R,
}

impl RandomPostFactory<StdRng> {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Reproducible sequence for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomPostFactory<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomPostFactory<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    fn pick(&mut self, pool: &[&'static str]) -> String {
        pool.choose(&mut self.rng).copied().unwrap_or("lorem").to_string()
    }

    fn words(&mut self, min: usize, max: usize) -> String {
        let n = self.rng.gen_range(min..=max);
        (0..n)
            .map(|_| self.pick(WORDS))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<R: Rng> PostFactory for RandomPostFactory<R> {
    fn generate(&mut self) -> NewPost {
        let seconds_ago = self.rng.gen_range(0..=86_400);

        NewPost {
            author: Author {
                first_name: self.pick(FIRST_NAMES),
                last_name: self.pick(LAST_NAMES),
            },
            title: self.words(2, 5),
            content: self.words(5, 15),
            created: Some(Utc::now() - Duration::seconds(seconds_ago)),
        }
    }
}

/// Deterministic posts numbered from 1: "Post 1", "Post 2", ...
#[derive(Debug, Default)]
pub struct FixedPostFactory {
    counter: usize,
}

impl PostFactory for FixedPostFactory {
    fn generate(&mut self) -> NewPost {
        self.counter += 1;
        NewPost {
            author: Author {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
            },
            title: format!("Post {}", self.counter),
            content: format!("Content of post {}", self.counter),
            created: None,
        }
    }
}

/// Generate `count` posts and bulk-insert them.
pub async fn seed_posts<F>(
    repo: &dyn PostRepository,
    factory: &mut F,
    count: usize,
) -> Result<Vec<BlogPost>, RepoError>
where
    F: PostFactory + ?Sized,
{
    tracing::info!(count, "Seeding post data");

    let posts = (0..count)
        .map(|_| BlogPost::create(factory.generate()))
        .collect();

    repo.insert_many(posts).await
}
