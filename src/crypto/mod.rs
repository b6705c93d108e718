//! Public-key schemes built on the curve group.

pub mod elgamal;

pub use elgamal::{
    Ciphertext, ElGamalKeys, decrypt, embed, encrypt, encrypt_with_rng, extract, generate_keys,
    generate_keys_with_rng,
};
