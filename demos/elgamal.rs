//! Example: ElGamal between two parties
//!
//! Bob publishes his public key as JSON, Alice encrypts a few messages for him
//! and sends the ciphertexts back as JSON in base 64.

use ec_elgamal::crypto::{encrypt_with_rng, generate_keys_with_rng};
use ec_elgamal::{
    ElGamalConfig, PrimeField, SerializableCiphertext, SerializablePublicKey, SerializationFormat,
};
use num_bigint::BigUint;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> ec_elgamal::Result<()> {
    env_logger::init();

    println!("\n=== ElGamal on a random curve over F_p, p = 2^61 - 1 ===\n");

    let mut rng = StdRng::from_os_rng();
    let field = PrimeField::new((1u64 << 61) - 1)?;
    let config = ElGamalConfig::default();
    println!("Config: {}", config.to_json()?);

    // Bob
    let keys = generate_keys_with_rng(&field, &mut rng)?;
    let published = SerializablePublicKey::from_keys(&keys, SerializationFormat::Base16).to_json()?;
    println!("\nBob's public key:\n{}", published);

    // Alice
    let (alpha, beta) = SerializablePublicKey::from_json(&published)?.to_points()?;
    let messages = [0u64, 42, 1_000_000, 123_456_789];
    let mut wire = Vec::new();
    for m in messages {
        let ciphertext = encrypt_with_rng(&BigUint::from(m), &alpha, &beta, &config, &mut rng)?;
        wire.push(
            SerializableCiphertext::from_ciphertext(&ciphertext, SerializationFormat::Base64)
                .to_json()?,
        );
    }
    println!("\nAlice sends {} ciphertexts, the first one:\n{}", wire.len(), wire[0]);

    // Bob again
    println!();
    for (json, m) in wire.iter().zip(messages) {
        let ciphertext = SerializableCiphertext::from_json(json)?.to_ciphertext()?;
        let recovered = ciphertext.decrypt(&config, &keys.private_key)?;
        println!("{:>12} -> {:>12} {}", m, recovered, if recovered == BigUint::from(m) { "✓" } else { "✗" });
    }

    Ok(())
}
