//! Sampling a truth into one concrete record.
//!
//! Sampling reads only the truth and the random source. Findings keep the
//! truth's problem order; an empty findings list is a legal outcome.

use rand::Rng;
use rand_distr::StandardNormal;

use casebook_contracts::{
    clinical::Sex,
    record::{AnnotatedConcept, ClinicalFinding, Record},
    truth::Truth,
};

use crate::age::random_age;

/// Draw one record from `truth`.
///
/// 1. Each problem is included iff a uniform draw in `[0, 1)` is strictly
///    less than its probability.
/// 2. Age is normal(mean, sd) truncated toward zero and clamped at 0, or the
///    general age model when either parameter is zero.
/// 3. Sex follows the truth's bias, or a fair coin without one.
pub fn sample<R: Rng + ?Sized>(truth: &Truth, rng: &mut R) -> Record {
    let findings = truth
        .problems()
        .iter()
        .filter(|problem| rng.gen::<f64>() < problem.probability())
        .map(|problem| ClinicalFinding {
            concept: AnnotatedConcept::new(problem.finding(), problem.ancestors()),
            duration: problem.duration(),
        })
        .collect();

    Record {
        age: sample_age(truth, rng),
        sex: sample_sex(truth, rng),
        findings,
        answer: AnnotatedConcept::new(truth.diagnosis(), truth.ancestors()),
    }
}

fn sample_age<R: Rng + ?Sized>(truth: &Truth, rng: &mut R) -> u32 {
    if truth.mean_age() == 0 || truth.std_dev_age() == 0 {
        return random_age(rng);
    }
    let z: f64 = rng.sample(StandardNormal);
    let age = z * f64::from(truth.std_dev_age()) + f64::from(truth.mean_age());
    // `as` saturates: negative ages become 0.
    age.trunc() as u32
}

fn sample_sex<R: Rng + ?Sized>(truth: &Truth, rng: &mut R) -> Sex {
    match truth.sex_bias().forced_sex() {
        Some(sex) => sex,
        None if rng.gen::<f32>() >= 0.5 => Sex::Male,
        None => Sex::Female,
    }
}
