use alignkit_alignment_rs::pairwise::dp::{Aligner, EndGaps, Mode, Params};
use alignkit_alignment_rs::pairwise::scoring::gaps::{Affine, Gaps};
use alignkit_alignment_rs::pairwise::scoring::symbols::Equality;
use alignkit_alignment_rs::pairwise::scoring::{Operand, Profile, SubstitutionMatrix, Transposed};
use alignkit_alignment_rs::pairwise::Alignment;
use alignkit_alignment_rs::Alignable;
use eyre::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::{self, assert_monotone, invrle, positions, Score};

fn align(params: Params<Score>, row: &[u8], col: &[u8]) -> Result<Alignment<Score>> {
    let mut alignment = Alignment::default();
    Aligner::new(params).align_sequences(&mut alignment, &row, &col, &Equality::new(1, -1))?;
    Ok(alignment)
}

mod local {
    use super::*;

    struct Workload<'a> {
        row: (&'a [u8], usize),
        col: (&'a [u8], usize),
        score: Score,
        rle: &'a str,
    }

    fn ensure(gaps: Gaps<Score>, w: Workload<'_>) -> Result<()> {
        let scoring = Equality::new(1, -2);
        let invrle = invrle(w.rle);
        let params = Params::local(gaps);

        for (row, col, rle) in [(w.row, w.col, w.rle), (w.col, w.row, invrle.as_str())] {
            let mut alignment = Alignment::default();
            Aligner::new(params).align_sequences(&mut alignment, &row.0, &col.0, &scoring)?;

            assert_eq!(alignment.row_from(), Some(row.1));
            assert_eq!(alignment.col_from(), Some(col.1));
            assert_eq!(*alignment.score(), w.score);
            assert_eq!(alignment.rle()?, rle);
        }
        Ok(())
    }

    #[test]
    fn test_empty() -> Result<()> {
        let workload: Vec<(&[u8], &[u8])> = vec![
            (b"ACGT", b""),
            (b"", b"ACGT"),
            (b"", b""),
            (b"ACGT", b"----"),
            (b"_", b"A"),
        ];

        for (row, col) in workload {
            let alignment = align(Params::default(), row, col)?;
            assert!(alignment.is_empty());
            assert_eq!(*alignment.score(), 0);
        }
        Ok(())
    }

    #[test]
    fn test_no_gaps() -> Result<()> {
        let gaps = Gaps::symmetric(-5, -1);
        let workload = vec![
            Workload {
                row: (b"AAGAA", 1),
                col: (b"AGA", 0),
                score: 3,
                rle: "3=",
            },
            Workload {
                row: (b"AGTCCCGTGTCCCAGGGG", 0),
                col: (b"AGTC", 0),
                score: 4,
                rle: "4=",
            },
            Workload {
                row: (b"CGCGCGCGTTT", 6),
                col: (b"CGTTT", 0),
                score: 5,
                rle: "5=",
            },
            Workload {
                row: (b"AAAA", 0),
                col: (b"AAAA", 0),
                score: 4,
                rle: "4=",
            },
            Workload {
                row: (b"AGAAAAAAAGGAAAAAAAGGGGG", 1),
                col: (b"G", 0),
                score: 1,
                rle: "1=",
            },
        ];

        for w in workload {
            ensure(gaps, w)?;
        }
        Ok(())
    }

    #[test]
    fn test_affine_gaps() -> Result<()> {
        ensure(
            Gaps::symmetric(-5, -1),
            Workload {
                row: (b"AAAAAAAAAAAAAAAA*********AAAAAAAAAAAAAAAA", 0),
                col: (b"AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA", 0),
                score: 18,
                rle: "16=9v16=",
            },
        )?;
        ensure(
            Gaps::symmetric(-1, -1),
            Workload {
                row: (b"A***AAAAAAAA***AAAAAAAA***A", 4),
                col: (b"AAAAAAAAAAAAAAAA", 0),
                score: 12,
                rle: "8=3v8=",
            },
        )
    }

    #[test]
    fn test_identical_sequences() -> Result<()> {
        let alignment = align(Params::local(Gaps::symmetric(-10, -2)), b"AAAA", b"AAAA")?;
        assert_eq!(positions(&alignment), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
        assert_eq!(*alignment.score(), 4);
        Ok(())
    }

    #[test]
    fn test_mismatched_core() -> Result<()> {
        let alignment = align(Params::local(Gaps::symmetric(-10, -2)), b"AABBAA", b"AACCAA")?;
        // Both flanks score 2, the first one is reported
        assert_eq!(positions(&alignment), vec![(0, 0), (1, 1)]);
        assert_eq!(*alignment.score(), 2);
        assert!(alignment
            .pairs()
            .iter()
            .all(|x| !(2..4).contains(&x.row) && !(2..4).contains(&x.col)));
        Ok(())
    }

    #[test]
    fn test_exhaustive() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(common::SEED + 6);
        for _ in 0..300 {
            let (rows, cols) = (rng.gen_range(1..=4), rng.gen_range(1..=4));
            let table = common::random_table(&mut rng, rows, cols);
            let gaps = common::random_gaps(&mut rng);

            let expected = common::monotone_chains(&table, rows, cols)
                .iter()
                .map(|x| common::rescore(x, &gaps, None))
                .fold(0, Score::max);

            let mut alignment = Alignment::default();
            Aligner::new(Params::local(gaps)).align(&mut alignment, &table, rows, cols)?;
            assert_eq!(*alignment.score(), expected);
        }
        Ok(())
    }

    #[test]
    fn test_properties() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(common::SEED);
        for _ in 0..200 {
            let (rows, cols) = (rng.gen_range(1..25), rng.gen_range(1..25));
            let table = common::random_table(&mut rng, rows, cols);
            let params = Params::local(common::random_gaps(&mut rng));

            let mut alignment = Alignment::default();
            Aligner::new(params).align(&mut alignment, &table, rows, cols)?;
            let score = *alignment.score();

            // Non-negativity
            assert!(score >= 0);
            assert_eq!(score == 0, alignment.is_empty());
            // Monotonicity and consistency of the reported pairs
            assert_monotone(&alignment);
            assert_eq!(common::rescore(alignment.pairs(), &params.gaps, None), score);

            // Symmetry
            let mut transposed = Alignment::default();
            Aligner::new(params.transposed()).align(
                &mut transposed,
                &Transposed(&table),
                cols,
                rows,
            )?;
            assert_eq!(*transposed.score(), score);
        }
        Ok(())
    }
}

mod global {
    use super::*;

    #[test]
    fn test_exhaustive() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(common::SEED + 7);
        for _ in 0..300 {
            let (rows, cols) = (rng.gen_range(1..=4), rng.gen_range(1..=4));
            let table = common::random_table(&mut rng, rows, cols);
            let gaps = common::random_gaps(&mut rng);
            let end_gaps = EndGaps::all();

            // Leaving everything unaligned is a valid global alignment too
            let expected = common::monotone_chains(&table, rows, cols)
                .iter()
                .map(|x| common::rescore(x, &gaps, Some((&end_gaps, rows, cols))))
                .max();

            let mut alignment = Alignment::default();
            Aligner::new(Params::global(gaps, end_gaps)).align(&mut alignment, &table, rows, cols)?;
            assert_eq!(Some(*alignment.score()), expected);
        }
        Ok(())
    }

    #[test]
    fn test_end_gaps() -> Result<()> {
        let gaps = Gaps::symmetric(-2, -1);

        // Trailing row residues are free
        let params = Params::global(gaps, EndGaps::new(true, false, true, true));
        let alignment = align(params, b"ACGTTTTT", b"ACG")?;
        assert_eq!(positions(&alignment), vec![(0, 0), (1, 1), (2, 2)]);
        assert_eq!(*alignment.score(), 3);

        // Penalized: 3 matches and a gap of 5 rows
        let alignment = align(Params::global(gaps, EndGaps::all()), b"ACGTTTTT", b"ACG")?;
        assert_eq!(*alignment.score(), 3 - 7);
        assert_eq!(alignment.row_from(), Some(0));

        // Leading column residues are free
        let params = Params::global(gaps, EndGaps::new(true, true, false, true));
        let alignment = align(params, b"ACG", b"TTTACG")?;
        assert_eq!(positions(&alignment), vec![(0, 3), (1, 4), (2, 5)]);
        assert_eq!(*alignment.score(), 3);
        Ok(())
    }

    #[test]
    fn test_full_coverage() -> Result<()> {
        let alignment = align(
            Params::global(Gaps::symmetric(-3, -1), EndGaps::all()),
            b"ACGTTACGT",
            b"ACGTACGT",
        )?;
        assert_eq!(alignment.row_from(), Some(0));
        assert_eq!(alignment.row_to(), Some(9));
        assert_eq!(alignment.col_from(), Some(0));
        assert_eq!(alignment.col_to(), Some(8));
        assert_eq!(*alignment.score(), 8 - 4);
        Ok(())
    }

    #[test]
    fn test_properties() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(common::SEED + 1);
        for _ in 0..200 {
            let (rows, cols) = (rng.gen_range(1..20), rng.gen_range(1..20));
            let table = common::random_table(&mut rng, rows, cols);
            let gaps = common::random_gaps(&mut rng);

            // Every residue is either aligned or covered by an accounted gap
            let params = Params::global(gaps, EndGaps::all());
            let mut alignment = Alignment::default();
            Aligner::new(params).align(&mut alignment, &table, rows, cols)?;
            assert_monotone(&alignment);
            assert_eq!(
                common::rescore(alignment.pairs(), &gaps, Some((&params.end_gaps, rows, cols))),
                *alignment.score()
            );

            // Symmetry under arbitrary end gaps
            let end_gaps = EndGaps::new(rng.gen(), rng.gen(), rng.gen(), rng.gen());
            let params = Params::global(gaps, end_gaps);
            Aligner::new(params).align(&mut alignment, &table, rows, cols)?;
            assert_monotone(&alignment);

            let mut transposed = Alignment::default();
            Aligner::new(params.transposed()).align(
                &mut transposed,
                &Transposed(&table),
                cols,
                rows,
            )?;
            assert_eq!(*transposed.score(), *alignment.score());
        }
        Ok(())
    }
}

mod wrap {
    use super::*;

    #[test]
    fn test_tandem_repeat() -> Result<()> {
        let alignment = align(Params::wrap(Gaps::symmetric(-10, -2)), b"ABAB", b"ABAB")?;
        assert_eq!(positions(&alignment), vec![(0, 2), (1, 3), (2, 0), (3, 1)]);
        assert_eq!(*alignment.score(), 4);
        assert!(!alignment.is_monotone());
        Ok(())
    }

    #[test]
    fn test_col_gap_across_boundary() -> Result<()> {
        // "AB" at the end of the column, then the gap over "X" continues at its start
        let (row, col): (&[u8], &[u8]) = (b"ABAB", b"XAB");
        let (scoring, gaps) = (Equality::new(5, -10), Gaps::symmetric(-1, -1));

        let mut wrapped = Alignment::default();
        Aligner::new(Params::wrap(gaps)).align_sequences(&mut wrapped, &row, &col, &scoring)?;
        assert_eq!(positions(&wrapped), vec![(0, 1), (1, 2), (2, 1), (3, 2)]);
        assert_eq!(*wrapped.score(), 5 + 5 - 2 + 5 + 5);

        let mut local = Alignment::default();
        Aligner::new(Params::local(gaps)).align_sequences(&mut local, &row, &col, &scoring)?;
        assert_eq!(*local.score(), 10);
        Ok(())
    }

    #[test]
    fn test_without_repeats() -> Result<()> {
        // Nothing to carry over the column axis: same as the local alignment
        let (row, col): (&[u8], &[u8]) = (b"TTGACCA", b"GACC");
        let wrapped = align(Params::wrap(Gaps::default()), row, col)?;
        let local = align(Params::local(Gaps::default()), row, col)?;
        assert_eq!(wrapped, local);
        assert_eq!(positions(&wrapped), vec![(2, 0), (3, 1), (4, 2), (5, 3)]);
        Ok(())
    }
}

#[test]
fn test_restricted_region() -> Result<()> {
    let (row, col): (&[u8], &[u8]) = (b"ACGTACGT", b"TTACGTTT");
    let aligner = Aligner::new(Params::new(
        Mode::Global,
        Gaps::new(Affine::new(-3, -1), Affine::new(-3, -1)),
        EndGaps::all(),
    ))
    .with_rows(4..8)
    .with_cols(2..6);

    let mut alignment = Alignment::default();
    aligner.align_sequences(&mut alignment, &row, &col, &Equality::new(1, -1))?;
    assert_eq!(positions(&alignment), vec![(4, 2), (5, 3), (6, 4), (7, 5)]);
    assert_eq!(*alignment.score(), 4);
    Ok(())
}

#[test]
fn test_profiles() -> Result<()> {
    let matrix = SubstitutionMatrix::identity(4, 2, -1)?;
    let (row, col): (&[u8], &[u8]) = (&[3, 0, 1, 2, 3], &[0, 1, 2]);
    let profile = Profile::from_sequence(col, &matrix)?;
    let aligner = Aligner::new(Params::local(Gaps::default()));

    let mut by_sequence = Alignment::default();
    let (seqrow, seqcol) = (Operand::Sequence(row), Operand::Sequence(col));
    aligner.align_operands(&mut by_sequence, seqrow, seqcol, &matrix)?;

    let mut by_profile = Alignment::default();
    aligner.align_operands(&mut by_profile, seqrow, Operand::Profile(&profile), &matrix)?;

    assert_eq!(by_sequence, by_profile);
    assert_eq!(positions(&by_profile), vec![(1, 0), (2, 1), (3, 2)]);
    assert_eq!(*by_profile.score(), 6);
    Ok(())
}

#[test]
fn test_reversed_input() -> Result<()> {
    let (row, col): (&[u8], &[u8]) = (b"ACGT", b"TGCA");
    let mut alignment = Alignment::default();
    Aligner::new(Params::local(Gaps::default())).align_sequences(
        &mut alignment,
        &row.reversed(),
        &col,
        &Equality::new(1, -1),
    )?;
    assert_eq!(positions(&alignment), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    assert_eq!(*alignment.score(), 4);
    Ok(())
}
