use ec_elgamal::crypto;
use ec_elgamal::{ElGamalConfig, EllipticCurve, PrimeField, Result};
use num_bigint::BigUint;

fn main() {
    env_logger::init();

    println!("=== Elliptic Curve ElGamal over Prime Fields ===\n");

    if let Err(err) = run() {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    demo_field()?;
    demo_curve()?;
    demo_elgamal()?;
    Ok(())
}

/// Arithmetic in F_17
fn demo_field() -> Result<()> {
    println!("--- Prime Field Arithmetic ---");

    let field = PrimeField::new(17)?;
    println!("Working in {}", field);

    let a = field.element(5);
    let b = field.element(12);
    println!("\na = {}", a);
    println!("b = {}", b);
    println!("a + b = {}", &a + &b);
    println!("a - b = {}", &a - &b);
    println!("a * b = {}", &a * &b);
    println!("-a = {}", -&a);

    if let Some(inv) = a.multiplicative_inverse() {
        println!("a^(-1) = {}", inv);
        println!("a * a^(-1) = {} (should be 1)", &a * &inv);
    }
    println!("a^16 = {} (Fermat)", a.pow(16)?);

    for value in [2, 3, 8] {
        let x = field.element(value);
        match x.sqrt()? {
            Some(root) => println!("sqrt({}) = {} ({}^2 = {})", x, root, root, root.square()),
            None => println!("{} is not a quadratic residue", x),
        }
    }
    println!();
    Ok(())
}

/// The curve y^2 = x^3 + 2x + 2 over F_17 and the multiples of (5, 1)
fn demo_curve() -> Result<()> {
    println!("--- Elliptic Curve Group ---");

    let curve = EllipticCurve::from_integers(2, 2, 17)?;
    println!("Curve: {}", curve);

    let p = curve.point(5, 1)?;
    println!("P = {}", p);
    println!("-P = {}", -&p);
    println!("2P = {}", p.double()?);

    let mut multiple = curve.point_at_infinity();
    for k in 1..=19 {
        multiple = multiple.checked_add(&p)?;
        println!("{:>2}P = {}", k, multiple);
    }
    println!();
    Ok(())
}

/// Key generation and a round trip over F_(2^127 - 1)
fn demo_elgamal() -> Result<()> {
    println!("--- ElGamal Encryption ---");

    let p = (BigUint::from(1u32) << 127usize) - 1u32;
    let keys = crypto::generate_keys(p)?;
    let config = ElGamalConfig::default();
    println!("Curve: {}", keys.curve());
    println!("alpha = {}", keys.alpha);
    println!("beta = {}", keys.beta);

    let message = BigUint::from(31_415_926_535u64);
    let ciphertext = crypto::encrypt(&message, &keys.alpha, &keys.beta, &config)?;
    println!("\nmessage = {}", message);
    println!("C1 = {}", ciphertext.c1);
    println!("C2 = {}", ciphertext.c2);

    let recovered = ciphertext.decrypt(&config, &keys.private_key)?;
    println!("decrypted = {} (matches: {})", recovered, recovered == message);
    Ok(())
}
