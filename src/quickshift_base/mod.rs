
use crate::distance_measure::DistanceMeasure;
use crate::utils::LibData;
use anyhow::{bail, Result};
use log::debug;
use ndarray::{Array2, ArrayView3};
use rayon::prelude::*;
use std::marker::PhantomData;

/// Quick shift mode seeking over a pixel grid.
///
/// The object borrows the image for its whole lifetime, is configured through
/// the sigma/tau/medoid setters, runs synchronously in [`QuickShift::process`]
/// and exposes its three result buffers through the getters. Internal buffers
/// are released when the object is dropped.
pub struct QuickShift<'a, A: LibData, D: DistanceMeasure<A>> {
    image: ArrayView3<'a, A>,
    sigma: A,
    tau: A,
    medoid: bool,
    parents: Option<Array2<usize>>,
    dists: Option<Array2<A>>,
    density: Option<Array2<A>>,
    distance_measure: PhantomData<D>,
}

impl<'a, A: LibData, D: DistanceMeasure<A>> QuickShift<'a, A, D> {
    /// Borrows a `rows x cols x channels` image and seeds the default
    /// bandwidths: `tau = max(rows, cols) / 50`, `sigma = max(2, tau / 3)`.
    pub fn new(_distance_measure: D, image: ArrayView3<'a, A>) -> Self {
        let (rows, cols, _) = image.dim();
        let tau = A::from_usize(rows.max(cols)).unwrap() / A::from_usize(50).unwrap();
        let sigma = (tau / A::from_usize(3).unwrap()).max(A::from_usize(2).unwrap());
        Self {
            image,
            sigma,
            tau,
            medoid: false,
            parents: None,
            dists: None,
            density: None,
            distance_measure: PhantomData,
        }
    }

    pub fn sigma(&self) -> A {
        self.sigma
    }

    pub fn set_sigma(&mut self, sigma: A) {
        self.sigma = sigma;
    }

    pub fn tau(&self) -> A {
        self.tau
    }

    pub fn set_tau(&mut self, tau: A) {
        self.tau = tau;
    }

    pub fn medoid(&self) -> bool {
        self.medoid
    }

    pub fn set_medoid(&mut self, medoid: bool) {
        self.medoid = medoid;
    }

    /// Parent map in row-major linear indices. Roots are their own parent.
    pub fn parents(&self) -> Option<&Array2<usize>> {
        self.parents.as_ref()
    }

    /// Distance to the parent. Roots carry an infinite gap.
    pub fn dists(&self) -> Option<&Array2<A>> {
        self.dists.as_ref()
    }

    pub fn density(&self) -> Option<&Array2<A>> {
        self.density.as_ref()
    }

    /// Estimates the density map and links every pixel to its parent,
    /// blocking until all three result buffers are populated.
    pub fn process(&mut self) -> Result<()> {
        let (rows, cols, channels) = self.image.dim();
        if rows == 0 || cols == 0 {
            bail!("image must not be empty.");
        }
        if !(self.sigma > A::zero()) || self.sigma.is_infinite() {
            bail!("sigma must be a positive finite value.");
        }
        if !(self.tau > A::zero()) || self.tau.is_infinite() {
            bail!("tau must be a positive finite value.");
        }
        let pixels = match self.image.to_slice() {
            Some(pixels) => pixels,
            None => bail!("image must be in standard (row-major) memory order."),
        };
        let grid = Grid {
            pixels,
            rows,
            cols,
            channels,
        };

        debug!(
            "quick shift on {}x{}x{} image (mode {}, sigma {}, tau {})",
            rows,
            cols,
            channels,
            if self.medoid { "medoid" } else { "quick" },
            self.sigma,
            self.tau
        );

        let density = density_map::<A, D>(&grid, self.sigma);
        let (parents, dists) = if self.medoid {
            link_pixels_medoid::<A, D>(&grid, self.sigma, self.tau)
        } else {
            link_pixels_quick::<A, D>(&grid, &density, self.tau)
        };

        self.parents = Some(Array2::from_shape_vec((rows, cols), parents)?);
        self.dists = Some(Array2::from_shape_vec((rows, cols), dists)?);
        self.density = Some(Array2::from_shape_vec((rows, cols), density)?);
        Ok(())
    }
}

pub(crate) struct Grid<'a, A> {
    pixels: &'a [A],
    rows: usize,
    cols: usize,
    channels: usize,
}

impl<'a, A: LibData> Grid<'a, A> {
    fn point(&self, row: usize, col: usize) -> &'a [A] {
        let base = (row * self.cols + col) * self.channels;
        &self.pixels[base..base + self.channels]
    }

    /// Joint squared distance: spatial offset plus channel dissimilarity.
    fn dist2<D: DistanceMeasure<A>>(&self, r1: usize, c1: usize, r2: usize, c2: usize) -> A {
        let dr = A::from_isize(r1 as isize - r2 as isize).unwrap();
        let dc = A::from_isize(c1 as isize - c2 as isize).unwrap();
        dr * dr + dc * dc + D::distance(self.point(r1, c1), self.point(r2, c2))
    }
}

fn window(center: usize, radius: usize, len: usize) -> std::ops::Range<usize> {
    center.saturating_sub(radius)..center.saturating_add(radius).saturating_add(1).min(len)
}

fn clamped_radius<A: LibData>(reach: A, rows: usize, cols: usize) -> usize {
    reach
        .ceil()
        .to_usize()
        .unwrap_or(usize::MAX)
        .min(rows.max(cols))
}

/// Parzen density estimate over the `3 * sigma` window around each pixel.
fn density_map<A: LibData, D: DistanceMeasure<A>>(grid: &Grid<A>, sigma: A) -> Vec<A> {
    let radius = clamped_radius(A::from_usize(3).unwrap() * sigma, grid.rows, grid.cols);
    let norm = A::from_usize(2).unwrap() * sigma * sigma;

    (0..grid.rows * grid.cols)
        .into_par_iter()
        .map(|idx| {
            let (row, col) = (idx / grid.cols, idx % grid.cols);
            let mut energy = A::zero();
            for jr in window(row, radius, grid.rows) {
                for jc in window(col, radius, grid.cols) {
                    let d2 = grid.dist2::<D>(row, col, jr, jc);
                    energy = energy + (-d2 / norm).exp();
                }
            }
            energy
        })
        .collect()
}

/// Links each pixel to the closest strictly denser pixel within `tau`.
fn link_pixels_quick<A: LibData, D: DistanceMeasure<A>>(
    grid: &Grid<A>,
    density: &[A],
    tau: A,
) -> (Vec<usize>, Vec<A>) {
    let radius = clamped_radius(tau, grid.rows, grid.cols);
    let tau2 = tau * tau;

    let linked: Vec<(usize, A)> = (0..grid.rows * grid.cols)
        .into_par_iter()
        .map(|idx| {
            let (row, col) = (idx / grid.cols, idx % grid.cols);
            let mut parent = idx;
            let mut best = A::INFINITY;
            for jr in window(row, radius, grid.rows) {
                for jc in window(col, radius, grid.cols) {
                    let j = jr * grid.cols + jc;
                    if density[j] > density[idx] {
                        let d2 = grid.dist2::<D>(row, col, jr, jc);
                        if d2 <= tau2 && d2 < best {
                            best = d2;
                            parent = j;
                        }
                    }
                }
            }
            let gap = if parent == idx { A::INFINITY } else { best.sqrt() };
            (parent, gap)
        })
        .collect();

    linked.into_iter().unzip()
}

/// Medoid variant: each pixel moves to the neighbor within `tau` that
/// minimizes the kernel-weighted medoid energy of its own neighborhood.
fn link_pixels_medoid<A: LibData, D: DistanceMeasure<A>>(
    grid: &Grid<A>,
    sigma: A,
    tau: A,
) -> (Vec<usize>, Vec<A>) {
    let kernel_radius = clamped_radius(A::from_usize(3).unwrap() * sigma, grid.rows, grid.cols);
    let link_radius = clamped_radius(tau, grid.rows, grid.cols);
    let norm = A::from_usize(2).unwrap() * sigma * sigma;
    let tau2 = tau * tau;

    let linked: Vec<(usize, A)> = (0..grid.rows * grid.cols)
        .into_par_iter()
        .map(|idx| {
            let (row, col) = (idx / grid.cols, idx % grid.cols);

            let mut support = Vec::new();
            for kr in window(row, kernel_radius, grid.rows) {
                for kc in window(col, kernel_radius, grid.cols) {
                    let weight = (-grid.dist2::<D>(row, col, kr, kc) / norm).exp();
                    support.push((kr, kc, weight));
                }
            }
            let energy = |jr: usize, jc: usize| -> A {
                support
                    .iter()
                    .map(|&(kr, kc, weight)| weight * grid.dist2::<D>(jr, jc, kr, kc))
                    .sum()
            };

            let mut parent = idx;
            let mut best = energy(row, col);
            for jr in window(row, link_radius, grid.rows) {
                for jc in window(col, link_radius, grid.cols) {
                    let j = jr * grid.cols + jc;
                    if j == idx {
                        continue;
                    }
                    if grid.dist2::<D>(row, col, jr, jc) > tau2 {
                        continue;
                    }
                    let candidate = energy(jr, jc);
                    if candidate < best {
                        best = candidate;
                        parent = j;
                    }
                }
            }
            let gap = if parent == idx {
                A::INFINITY
            } else {
                grid.dist2::<D>(row, col, parent / grid.cols, parent % grid.cols)
                    .sqrt()
            };
            (parent, gap)
        })
        .collect();

    linked.into_iter().unzip()
}

/// Resolves every pixel of a parent map to the root of its tree and counts
/// the distinct roots. Walks are memoized; a path-length guard breaks
/// malformed (cyclic) maps deterministically instead of looping.
pub fn flatmap(parents: &Array2<usize>) -> (Array2<usize>, usize) {
    let flat: Vec<usize> = parents.iter().copied().collect();
    let n = flat.len();
    let mut roots = vec![usize::MAX; n];
    let mut path = Vec::new();

    for start in 0..n {
        if roots[start] != usize::MAX {
            continue;
        }
        path.clear();
        let mut current = start;
        let root = loop {
            if roots[current] != usize::MAX {
                break roots[current];
            }
            if flat[current] == current || path.len() > n {
                break current;
            }
            path.push(current);
            current = flat[current];
        };
        for &visited in &path {
            roots[visited] = root;
        }
        roots[current] = root;
    }

    let n_modes = roots
        .iter()
        .enumerate()
        .filter(|&(idx, &root)| idx == root)
        .count();

    (
        Array2::from_shape_vec(parents.raw_dim(), roots).unwrap(),
        n_modes,
    )
}
