//! Suffix array construction by prefix doubling.
//!
//! Each round sorts suffixes by the pair (rank of the first `k` symbols, rank of
//! the next `k`), then re-ranks. Suffixes running past the end of the text rank
//! below every real symbol. Terminates once all ranks are distinct, which takes
//! at most `log2(n)` rounds since all suffixes of one text differ in length.

/// Sorted start positions of every suffix of `text`.
pub(crate) fn build(text: &[u8]) -> Vec<u32> {
    let n = text.len();
    if n == 0 {
        return Vec::new();
    }
    debug_assert!(n <= u32::MAX as usize);

    let mut sa: Vec<u32> = (0..n as u32).collect();
    let mut rank: Vec<u32> = text.iter().map(|&b| b as u32).collect();
    let mut next_rank = vec![0u32; n];
    let mut k = 1usize;

    loop {
        {
            let key = |i: u32| -> (u32, u32) {
                let i = i as usize;
                let second = if i + k < n { rank[i + k] + 1 } else { 0 };
                (rank[i], second)
            };
            sa.sort_unstable_by_key(|&i| key(i));

            next_rank[sa[0] as usize] = 0;
            for w in 1..n {
                let bump = (key(sa[w - 1]) < key(sa[w])) as u32;
                next_rank[sa[w] as usize] = next_rank[sa[w - 1] as usize] + bump;
            }
        }
        std::mem::swap(&mut rank, &mut next_rank);

        if rank[sa[n - 1] as usize] as usize == n - 1 {
            break;
        }
        k <<= 1;
    }

    sa
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(text: &[u8]) -> Vec<u32> {
        let mut sa: Vec<u32> = (0..text.len() as u32).collect();
        sa.sort_by(|&a, &b| text[a as usize..].cmp(&text[b as usize..]));
        sa
    }

    #[test]
    fn empty_text() {
        assert!(build(b"").is_empty());
    }

    #[test]
    fn single_symbol() {
        assert_eq!(build(b"A"), vec![0]);
    }

    #[test]
    fn banana() {
        // a, ana, anana, banana, na, nana
        assert_eq!(build(b"banana"), vec![5, 3, 1, 0, 4, 2]);
    }

    #[test]
    fn repetitive_text() {
        let text = b"AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
        assert_eq!(build(text), naive(text));
    }

    #[test]
    fn with_separators() {
        let text = b"MKV\0MKVW\0\0KV\0";
        assert_eq!(build(text), naive(text));
    }

    #[test]
    fn protein_like_text() {
        let text = b"MAIVMGR*KGAR*\0WPL*WAAERVPD\0GHCNGPLKGCPI\0MAIVMGR\0";
        assert_eq!(build(text), naive(text));
    }
}
