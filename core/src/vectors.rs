use std::sync::LazyLock;

// Tables of 256 unit-length gradient vectors, indexed by the 8-bit lattice hash.
// Built once from a fixed xorshift sequence so every process sees the same values.
pub(crate) static RANDOM_VECTORS_3D: LazyLock<[[f64; 3]; 256]> =
    LazyLock::new(|| unit_vectors(0x9E37_79B9_7F4A_7C15));

pub(crate) static RANDOM_VECTORS_6D: LazyLock<[[f64; 6]; 256]> =
    LazyLock::new(|| unit_vectors(0xD1B5_4A32_D192_ED03));

struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    // Uniform in [-1, 1) from the top 53 bits.
    fn next_signed(&mut self) -> f64 {
        (self.next() >> 11) as f64 / (1u64 << 53) as f64 * 2.0 - 1.0
    }
}

fn unit_vectors<const N: usize>(seed: u64) -> [[f64; N]; 256] {
    let mut rng = XorShift(seed);
    let mut table = [[0.0; N]; 256];
    for slot in table.iter_mut() {
        // Rejection sampling inside the unit ball keeps directions uniform.
        loop {
            let mut v = [0.0; N];
            for c in v.iter_mut() {
                *c = rng.next_signed();
            }
            let len_sq: f64 = v.iter().map(|c| c * c).sum();
            if len_sq > 1.0e-4 && len_sq <= 1.0 {
                let len = len_sq.sqrt();
                for (dst, c) in slot.iter_mut().zip(v) {
                    *dst = c / len;
                }
                break;
            }
        }
    }
    table
}
