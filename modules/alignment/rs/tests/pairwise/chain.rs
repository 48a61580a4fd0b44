use alignkit_alignment_rs::pairwise::chain::{
    DiagonalGapCost, Dot, DotAligner, Dots, DotsDiagonal, DotsSquared, Fragment, FragmentAligner,
    Fragments, FragmentsSquared, GapCost,
};
use alignkit_alignment_rs::pairwise::dottor::Dottor;
use alignkit_alignment_rs::pairwise::dp::{Aligner, Params};
use alignkit_alignment_rs::pairwise::scoring::gaps::Gaps;
use alignkit_alignment_rs::pairwise::scoring::symbols::Equality;
use alignkit_alignment_rs::pairwise::scoring::Pairwise;
use alignkit_alignment_rs::pairwise::{Alignment, ResiduePair};
use eyre::Result;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use crate::common::{self, assert_monotone, positions, Score};

fn chain_dots(aligner: &impl DotAligner<Score>, dots: &[Dot<Score>]) -> Result<Alignment<Score>> {
    let mut alignment = Alignment::default();
    aligner.align(&mut alignment, dots)?;
    Ok(alignment)
}

fn chain_fragments(
    aligner: &impl FragmentAligner<Score>,
    fragments: &[Fragment<Score>],
) -> Result<Alignment<Score>> {
    let mut alignment = Alignment::default();
    aligner.align(&mut alignment, fragments)?;
    Ok(alignment)
}

fn random_dots(rng: &mut StdRng, rows: usize, cols: usize) -> Vec<Dot<Score>> {
    let amount = rng.gen_range(0..=rows * cols / 2);
    index::sample(rng, rows * cols, amount)
        .into_iter()
        .map(|x| Dot::new(x / cols, x % cols, rng.gen_range(-3..=4)))
        .collect()
}

#[test]
fn test_dense_chaining_is_local_alignment() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(common::SEED + 2);
    for _ in 0..100 {
        let (rows, cols) = (rng.gen_range(1..15), rng.gen_range(1..15));
        let table = common::random_table(&mut rng, rows, cols);
        let gaps = common::random_gaps(&mut rng);

        let mut expected = Alignment::default();
        Aligner::new(Params::local(gaps)).align(&mut expected, &table, rows, cols)?;
        let expected = *expected.score();

        let dots = common::dense_dots(&table, rows, cols);
        let cost = GapCost::new(gaps);
        assert_eq!(*chain_dots(&Dots::new(cost), &dots)?.score(), expected);
        assert_eq!(*chain_dots(&DotsSquared::new(cost), &dots)?.score(), expected);

        let singletons: Vec<_> = dots.iter().map(|x| Alignment::from_pairs(vec![*x])).collect();
        assert_eq!(*chain_fragments(&Fragments::new(cost), &singletons)?.score(), expected);
        assert_eq!(
            *chain_fragments(&FragmentsSquared::new(cost), &singletons)?.score(),
            expected
        );
    }
    Ok(())
}

#[test]
fn test_sparse_dots() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(common::SEED + 3);
    for _ in 0..300 {
        let (rows, cols) = (rng.gen_range(1..30), rng.gen_range(1..30));
        let dots = random_dots(&mut rng, rows, cols);
        let gaps = common::random_gaps(&mut rng);
        let cost = GapCost::new(gaps);

        let fast = chain_dots(&Dots::new(cost), &dots)?;
        let squared = chain_dots(&DotsSquared::new(cost), &dots)?;
        assert_eq!(fast.score(), squared.score());

        for alignment in [&fast, &squared] {
            assert_monotone(alignment);
            assert_eq!(alignment.is_empty(), *alignment.score() == 0);
            assert_eq!(common::rescore(alignment.pairs(), &gaps, None), *alignment.score());
        }
    }
    Ok(())
}

#[test]
fn test_diagonal_gap_model() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(common::SEED + 5);
    for _ in 0..200 {
        let (rows, cols) = (rng.gen_range(1..30), rng.gen_range(1..30));
        let dots = random_dots(&mut rng, rows, cols);
        let cost = DiagonalGapCost::new(common::random_gaps(&mut rng));

        let alignment = chain_dots(&DotsDiagonal::new(cost), &dots)?;
        assert_monotone(&alignment);
        assert!(*alignment.score() >= 0);

        let pairs = alignment.pairs();
        let mut expected: Score = pairs.iter().map(|x| x.score).sum();
        for (prv, nxt) in pairs.iter().zip(pairs.iter().skip(1)) {
            let (prv, nxt) = (prv.position(), nxt.position());
            expected += cost.between(
                (prv.0 as Score, prv.1 as Score),
                (nxt.0 as Score, nxt.1 as Score),
            );
        }
        assert_eq!(expected, *alignment.score());

        // Any single dot is a chain too
        assert!(dots.iter().all(|x| x.score <= *alignment.score()));
    }
    Ok(())
}

#[test]
fn test_sparse_fragments() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(common::SEED + 4);
    for _ in 0..300 {
        let amount = rng.gen_range(0..25);
        let fragments: Vec<_> = (0..amount)
            .map(|_| {
                let (row, col, len) = (
                    rng.gen_range(0..40),
                    rng.gen_range(0..40),
                    rng.gen_range(1..5),
                );
                let pairs = (0..len)
                    .map(|x| ResiduePair::new(row + x, col + x, rng.gen_range(-2..=3)))
                    .collect();
                Alignment::from_pairs(pairs)
            })
            .collect();
        let gaps = common::random_gaps(&mut rng);
        let cost = GapCost::new(gaps);

        let fast = chain_fragments(&Fragments::new(cost), &fragments)?;
        let squared = chain_fragments(&FragmentsSquared::new(cost), &fragments)?;
        assert_eq!(fast.score(), squared.score());
        assert!(*fast.score() >= 0);

        for alignment in [&fast, &squared] {
            assert_monotone(alignment);
            assert_eq!(common::rescore(alignment.pairs(), &gaps, None), *alignment.score());
        }
    }
    Ok(())
}

#[test]
fn test_dot_plot() -> Result<()> {
    let (row, col): (&[u8], &[u8]) = (b"AABBAA", b"AACCAA");
    let equality = Equality::new(1, -1);
    let scorer = Pairwise::new(&row, &col, &equality);
    let dots = Dottor::new(1).dots(&scorer, row.len(), col.len());
    assert_eq!(dots.len(), 16);

    let cost = GapCost::new(Gaps::symmetric(-10, -2));
    let fast = chain_dots(&Dots::new(cost), &dots)?;
    let squared = chain_dots(&DotsSquared::new(cost), &dots)?;
    for alignment in [fast, squared] {
        assert_eq!(positions(&alignment), vec![(0, 0), (1, 1)]);
        assert_eq!(*alignment.score(), 2);
    }

    // Free gaps join both flanks
    let free = GapCost::new(Gaps::symmetric(0, 0));
    let joined = chain_dots(&Dots::new(free), &dots)?;
    assert_eq!(*joined.score(), 4);
    assert_monotone(&joined);
    Ok(())
}

#[test]
fn test_invalid_input() {
    let dots = vec![Dot::new(0, 0, 1), Dot::new(0, 0, 2)];
    assert!(chain_dots(&Dots::<Score>::default(), &dots).is_err());
    assert!(chain_dots(&DotsSquared::<Score>::default(), &dots).is_err());

    let fragments = vec![Alignment::default()];
    assert!(chain_fragments(&Fragments::<Score>::default(), &fragments).is_err());
    assert!(chain_fragments(&FragmentsSquared::<Score>::default(), &fragments).is_err());
}
