/// Fan-triangulates a convex polygon given its corner vertex indices.
///
/// Yields `(v[0], v[j - 1], v[j])` for `j` in `2..n`, so `n - 2` triangles
/// for `n >= 3` and none otherwise.
pub fn fan_triangles(corners: &[u32]) -> impl Iterator<Item = [u32; 3]> + '_ {
    corners
        .split_first()
        .into_iter()
        .flat_map(|(&apex, rest)| rest.windows(2).map(move |w| [apex, w[0], w[1]]))
}
