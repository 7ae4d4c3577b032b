//! Random question selection for quiz play

use rand::Rng;
use rand::seq::SliceRandom;

use crate::models::Question;

/// Pick one question from `pool` whose id is not in `previous`.
///
/// The pool is shuffled before filtering and the survivor is then drawn
/// uniformly, so every unseen question is equally likely. `None` means the
/// pool is exhausted and the quiz is over.
pub fn pick_question<R>(mut pool: Vec<Question>, previous: &[i64], rng: &mut R) -> Option<Question>
where
    R: Rng + ?Sized,
{
    pool.shuffle(rng);

    let unseen: Vec<Question> = pool
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();

    unseen.choose(rng).cloned()
}
