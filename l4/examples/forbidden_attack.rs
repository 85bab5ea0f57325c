//! Example: Forbidden Attack on AES-GCM
//!
//! Encrypts three messages under one reused (key, nonce) pair, recovers the
//! GHASH key from them and forges a valid tag for a chosen ciphertext.

use l4::aes_gcm::AesGcm;
use l4::api::{block_to_base64, bytes_to_base64};
use l4::cantor::linear_factor_product;
use l4::forbidden::{attack_polynomial, ForbiddenAttack, GcmMessage};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), l4::Error> {
    println!("\n╔════════════════════════════════════════════════════════════════╗");
    println!("║              Forbidden Attack (GCM Nonce Reuse)                ║");
    println!("╚════════════════════════════════════════════════════════════════╝\n");

    let key = [0x2bu8; 16];
    let nonce = [0xcau8; 12];
    let gcm = AesGcm::new(&key, &nonce)?;

    println!("📌 Key:   {}", hex::encode(key));
    println!(
        "📌 Nonce: {} (reused for every message)\n",
        hex::encode(nonce)
    );

    let plaintexts: [(&[u8], &[u8]); 3] = [
        (b"", b"Meet me at the usual place"),
        (b"header", b"Bring the package"),
        (b"", b"Confirm by noon tomorrow, not later"),
    ];
    let messages: Vec<GcmMessage> = plaintexts
        .iter()
        .map(|(ad, pt)| gcm.encrypt(ad, pt).into_message(ad))
        .collect();

    for (i, msg) in messages.iter().enumerate() {
        println!("Message {}:", i + 1);
        println!("   AD:         {}", bytes_to_base64(&msg.associated_data));
        println!("   Ciphertext: {}", bytes_to_base64(&msg.ciphertext));
        if let Some(tag) = &msg.auth_tag {
            println!("   Tag:        {}\n", block_to_base64(tag));
        }
    }

    let (m1, m2, m3) = (&messages[0], &messages[1], &messages[2]);
    let f = attack_polynomial(m1, m2)?;
    let roots = linear_factor_product(&f)?;
    println!("🔎 Attack polynomial degree: {}", f.degree());
    println!(
        "   Distinct roots in GF(2^128): {}\n",
        roots.degree().max(0)
    );

    let mut rng = StdRng::seed_from_u64(2024);
    let attack = ForbiddenAttack::new();
    let recovered = attack.recover_key(m1, m2, m3, &mut rng)?;
    println!("🔑 Recovered H:      {}", recovered.auth_key);
    println!("   Actual H:         {}", hex::encode(gcm.auth_key()));
    println!("   Recovered E_K(Y0): {}\n", recovered.keystream_mask);

    let forged_ct = gcm.apply_keystream(b"Send the money to the other account");
    let target = GcmMessage::untagged(b"", &forged_ct);
    let forged = attack.recover(m1, m2, m3, &target, &mut rng)?;
    let actual = gcm.auth_tag(b"", &forged_ct);

    println!("✍️  Forged tag: {}", block_to_base64(&forged));
    println!("   Real tag:   {}", block_to_base64(&actual));
    println!(
        "   {}\n",
        if forged == actual {
            "✓ Forgery accepted"
        } else {
            "✗ Forgery rejected"
        }
    );

    Ok(())
}
