//! Built-in curve domain parameters.
//!
//! - `sm2p256v1`: the recommended SM2 curve, adapted from
//!   [draft-shen-sm2-ecdsa Appendix D]: Recommended Parameters.
//! - `example_fp256`: the 256-bit prime-field curve used by the worked
//!   examples of GB/T 32918 (also GM/T 0003 Part 5). Handy for checking an
//!   implementation against the standard's published intermediate values; do
//!   not use it to protect real data.
//!
//! [draft-shen-sm2-ecdsa Appendix D]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#appendix-D

use crate::CurveParams;

/// p = FFFFFFFE FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF 00000000 FFFFFFFF FFFFFFFF
const SM2P256V1_P: &str = "FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000FFFFFFFFFFFFFFFF";

/// a = -3 mod p
const SM2P256V1_A: &str = "FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000FFFFFFFFFFFFFFFC";

const SM2P256V1_B: &str = "28E9FA9E9D9F5E344D5A9E4BCF6509A7F39789F515AB8F92DDBCBD414D940E93";

const SM2P256V1_GX: &str = "32C4AE2C1F1981195F9904466A39C9948FE30BBFF2660BE1715A4589334C74C7";

const SM2P256V1_GY: &str = "BC3736A2F4F6779C59BDCEE36B692153D0A9877CC62A474002DF32E52139F0A0";

const SM2P256V1_N: &str = "FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFF7203DF6B21C6052B53BBF40939D54123";

const EXAMPLE_FP256_P: &str = "8542D69E4C044F18E8B92435BF6FF7DE457283915C45517D722EDB8B08F1DFC3";

const EXAMPLE_FP256_A: &str = "787968B4FA32C3FD2417842E73BBFEFF2F3C848B6831D7E0EC65228B3937E498";

const EXAMPLE_FP256_B: &str = "63E4C6D3B23B0C849CF84241484BFE48F61D59A5B16BA06E6E12D1DA27C5249A";

const EXAMPLE_FP256_GX: &str = "421DEBD61B62EAB6746434EBC3CC315E32220B3BADD50BDC4C4E6C147FEDD43D";

const EXAMPLE_FP256_GY: &str = "0680512BCBB42C07D47349D2153B70C4E5D7FDFCBFA36EA1A85841B9E46E09A2";

const EXAMPLE_FP256_N: &str = "8542D69E4C044F18E8B92435BF6FF7DD297720630485628D5AE74EE7C32E79B7";

impl CurveParams {
    /// The recommended SM2 curve `sm2p256v1` (cofactor 1).
    pub fn sm2p256v1() -> Self {
        Self::from_be_hex_unchecked(
            SM2P256V1_P,
            SM2P256V1_A,
            SM2P256V1_B,
            1,
            (SM2P256V1_GX, SM2P256V1_GY),
            SM2P256V1_N,
        )
    }

    /// The 256-bit example curve of GB/T 32918 (cofactor 1).
    pub fn example_fp256() -> Self {
        Self::from_be_hex_unchecked(
            EXAMPLE_FP256_P,
            EXAMPLE_FP256_A,
            EXAMPLE_FP256_B,
            1,
            (EXAMPLE_FP256_GX, EXAMPLE_FP256_GY),
            EXAMPLE_FP256_N,
        )
    }
}
