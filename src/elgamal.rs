//! Lifted ElGamal encryption over a prime-order group.
//!
//! Plaintexts are scalars embedded in the exponent: a message `m` is encrypted as `h * m` for a
//! given base `h`, and decryption recovers `h * m`, never `m` itself. The scheme is used as the
//! blinding channel during credential issuance, so [`Encryption::new`] also returns the
//! encryption randomness which the requester needs for its proofs of knowledge.
//!
//! The module is deliberately independent of the signature scheme and its params; the group
//! generator is passed explicitly.

use ark_ec::{AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{rand::RngCore, UniformRand};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use zeroize::{Zeroize, ZeroizeOnDrop};

use dock_crypto_utils::serde_utils::ArkObjectBytes;

/// Decryption key. Must stay with the party requesting a blind signature.
#[serde_as]
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Zeroize,
    ZeroizeOnDrop,
    CanonicalSerialize,
    CanonicalDeserialize,
    Serialize,
    Deserialize,
)]
pub struct SecretKey<F: PrimeField>(#[serde_as(as = "ArkObjectBytes")] pub F);

/// Encryption key `gen * d` matching the secret `d`.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
pub struct PublicKey<G: AffineRepr>(#[serde_as(as = "ArkObjectBytes")] pub G);

impl<F: PrimeField> SecretKey<F> {
    pub fn new<R: RngCore>(rng: &mut R) -> Self {
        Self(F::rand(rng))
    }
}

impl<G: AffineRepr> PublicKey<G> {
    pub fn new(secret_key: &SecretKey<G::ScalarField>, gen: &G) -> Self {
        Self(gen.mul_bigint(secret_key.0.into_bigint()).into_affine())
    }
}

/// Generates a fresh decryption/encryption keypair over the supplied generator.
pub fn keygen<R: RngCore, G: AffineRepr>(
    rng: &mut R,
    gen: &G,
) -> (SecretKey<G::ScalarField>, PublicKey<G>) {
    let sk = SecretKey::new(rng);
    let pk = PublicKey::new(&sk, gen);

    (sk, pk)
}

/// Lifted ElGamal encryption of a scalar message `m`:
/// `(c1, c2) = (gen * k, pk * k + h * m)`.
#[serde_as]
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    CanonicalSerialize,
    CanonicalDeserialize,
    Serialize,
    Deserialize,
)]
pub struct Encryption<G: AffineRepr> {
    #[serde_as(as = "ArkObjectBytes")]
    pub c1: G,
    #[serde_as(as = "ArkObjectBytes")]
    pub c2: G,
}

impl<G: AffineRepr> Encryption<G> {
    /// Encrypts `message` lifted to `h * message` under `public_key`. Returns the ciphertext
    /// along with the randomness `k` as the caller proves knowledge of `(message, k)` later.
    pub fn new<R: RngCore>(
        rng: &mut R,
        message: &G::ScalarField,
        h: &G,
        public_key: &PublicKey<G>,
        gen: &G,
    ) -> (Self, G::ScalarField) {
        let k = G::ScalarField::rand(rng);

        let c1 = gen.mul_bigint(k.into_bigint());
        let c2 = G::Group::msm_unchecked(&[public_key.0, *h], &[k, *message]);

        (
            Self {
                c1: c1.into_affine(),
                c2: c2.into_affine(),
            },
            k,
        )
    }

    /// Recovers the lifted plaintext `h * message` as `c2 - c1 * d`.
    pub fn decrypt(&self, secret_key: &SecretKey<G::ScalarField>) -> G {
        (self.c2.into_group() - self.c1.mul_bigint(secret_key.0.into_bigint())).into_affine()
    }
}
