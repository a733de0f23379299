use alloc::vec::Vec;

use ark_bls12_381::{Bls12_381, Fr};
use ark_std::rand::{rngs::StdRng, SeedableRng};
use blake2::Blake2b512;
use sha2::Sha256;

use dock_crypto_utils::hashing_utils::field_elem_from_try_and_incr;
use secret_sharing_and_dkg::common::ParticipantId;

use crate::{
    deal, elgamal, keygen, AggregatedSignature, BlindSignRequest, BlindSignature,
    BlindSignatureError, Signature, SignaturePoK, SignaturePoKError, SignatureParams,
    VerificationKey,
};

fn attr(value: &str) -> Fr {
    field_elem_from_try_and_incr::<Fr, Sha256>(value.as_bytes())
}

fn attrs(values: &[&str]) -> Vec<Fr> {
    values.iter().map(|value| attr(value)).collect()
}

fn test_params(message_count: u32) -> SignatureParams<Bls12_381> {
    SignatureParams::new::<Blake2b512>(b"test", message_count).unwrap()
}

#[test]
fn single_public_attribute() {
    let mut rng = StdRng::seed_from_u64(0u64);
    let params = test_params(1);
    let (sk, vk) = keygen(&mut rng, &params).unwrap();

    let msgs = attrs(&["Hello World!"]);
    let sig = Signature::new(&mut rng, &msgs, &sk, &params).unwrap();

    assert!(sig.verify(&msgs, &vk));
    assert!(!sig.verify(&attrs(&["Malicious Hello World!"]), &vk));

    let malicious_sig =
        Signature::new(&mut rng, &attrs(&["Malicious Hello World!"]), &sk, &params).unwrap();
    assert!(!malicious_sig.verify(&msgs, &vk));
}

#[test]
fn three_public_attributes_aggregated_from_three_authorities() {
    let mut rng = StdRng::seed_from_u64(0u64);
    let params = test_params(3);
    let msgs = attrs(&["Foo", "Bar", "Baz"]);

    let (vks, sigs): (Vec<_>, Vec<_>) = (0..3)
        .map(|_| {
            let (sk, vk) = keygen(&mut rng, &params).unwrap();
            let sig = Signature::new_deterministic::<Blake2b512>(&msgs, &sk).unwrap();
            assert!(sig.verify(&msgs, &vk));

            (vk, sig)
        })
        .unzip();

    let avk = VerificationKey::aggregate(&vks).unwrap();
    let asig = AggregatedSignature::new(&sigs).unwrap();

    assert!(asig.verify(&msgs, &avk));
}

#[test]
fn threshold_two_of_three_with_mixed_attributes() {
    let mut rng = StdRng::seed_from_u64(0u64);

    let blinded = attrs(&["Foo", "Bar", "42"]);
    let revealed = attrs(&["Baz", "43"]);
    let all: Vec<_> = blinded.iter().chain(&revealed).copied().collect();

    let params = test_params(5);
    let (dk, ek) = elgamal::keygen(&mut rng, &params.g1);

    let request =
        BlindSignRequest::new::<_, Blake2b512>(&mut rng, &blinded, &revealed, &ek, &params)
            .unwrap();

    let (sks, vks) = deal(&mut rng, &params, 2, 3).unwrap();

    let sigs: Vec<_> = sks
        .iter()
        .map(|sk| {
            BlindSignature::new::<Blake2b512>(&request, sk, &ek, &revealed, &params)
                .unwrap()
                .unblind(&dk)
        })
        .collect();

    let subsets: [&[ParticipantId]; 2] = [&[1, 2], &[2, 3]];
    let aggregated: Vec<_> = subsets
        .iter()
        .map(|subset| {
            let avk = VerificationKey::aggregate_threshold(
                subset.iter().map(|&id| (id, &vks[id as usize - 1])),
            )
            .unwrap();
            let asig = AggregatedSignature::new_threshold(
                subset.iter().map(|&id| (id, &sigs[id as usize - 1])),
            )
            .unwrap();

            (avk, asig)
        })
        .collect();

    // both subsets converge to the same federation key and credential
    assert_eq!(aggregated[0].0, aggregated[1].0);
    assert_eq!(*aggregated[0].1, *aggregated[1].1);

    for (avk, asig) in &aggregated {
        let credential = asig.randomize(&mut rng);
        let show =
            SignaturePoK::new::<_, Blake2b512>(&mut rng, &credential, &blinded, avk).unwrap();

        assert!(show.verify::<Blake2b512>(&credential, &revealed, avk));
        // revealing the blinded attributes makes it an ordinary credential
        assert!(credential.verify(&all, avk));
    }

    // a credential shown under one subset's key verifies under the other's
    let credential = aggregated[0].1.randomize(&mut rng);
    let show =
        SignaturePoK::new::<_, Blake2b512>(&mut rng, &credential, &blinded, &aggregated[1].0)
            .unwrap();
    assert!(show.verify::<Blake2b512>(&credential, &revealed, &aggregated[1].0));
}

#[test]
fn blind_sign_rejects_tampered_encryption_key() {
    let mut rng = StdRng::seed_from_u64(0u64);
    let params = test_params(6);
    let (sk, _) = keygen(&mut rng, &params).unwrap();
    let (_, ek) = elgamal::keygen(&mut rng, &params.g1);

    let blinded = attrs(&["Foo2", "Bar2", "Baz2"]);
    let revealed = attrs(&["Foo", "Bar", "Baz"]);
    let request =
        BlindSignRequest::new::<_, Blake2b512>(&mut rng, &blinded, &revealed, &ek, &params)
            .unwrap();

    let (_, tampered_ek) = elgamal::keygen(&mut rng, &params.g1);
    assert!(matches!(
        BlindSignature::new::<Blake2b512>(&request, &sk, &tampered_ek, &revealed, &params)
            .unwrap_err(),
        BlindSignatureError::Proof(_)
    ));
}

#[test]
fn blind_sign_rejects_overflowing_attributes() {
    let mut rng = StdRng::seed_from_u64(0u64);
    let params = test_params(6);
    let (sk, _) = keygen(&mut rng, &params).unwrap();
    let (_, ek) = elgamal::keygen(&mut rng, &params.g1);

    let blinded = attrs(&["Foo2", "Bar2", "Baz2"]);
    let revealed = attrs(&["Foo", "Bar", "Baz"]);

    // request itself refuses to overflow the params
    assert_eq!(
        BlindSignRequest::new::<_, Blake2b512>(
            &mut rng,
            &blinded,
            &attrs(&["Foo", "Bar", "Baz", "Qux"]),
            &ek,
            &params,
        )
        .unwrap_err(),
        BlindSignatureError::TooManyMessages {
            received: 7,
            max: 6,
        }
    );

    // and so does the signer when a dummy revealed attribute pushes the total over
    let request =
        BlindSignRequest::new::<_, Blake2b512>(&mut rng, &blinded, &revealed, &ek, &params)
            .unwrap();
    let overflowing: Vec<_> = revealed.iter().copied().chain([attr("Qux")]).collect();
    assert_eq!(
        BlindSignature::new::<Blake2b512>(&request, &sk, &ek, &overflowing, &params).unwrap_err(),
        BlindSignatureError::TooManyMessages {
            received: 7,
            max: 6,
        }
    );
}

#[test]
fn show_rejects_invalid_attribute_counts() {
    let mut rng = StdRng::seed_from_u64(0u64);
    let params = test_params(2);
    let (sk, vk) = keygen(&mut rng, &params).unwrap();
    let (dk, ek) = elgamal::keygen(&mut rng, &params.g1);

    let blinded = attrs(&["Foo", "Bar"]);
    let request =
        BlindSignRequest::new::<_, Blake2b512>(&mut rng, &blinded, &[], &ek, &params).unwrap();
    let sig = BlindSignature::new::<Blake2b512>(&request, &sk, &ek, &[], &params)
        .unwrap()
        .unblind(&dk);

    assert_eq!(
        SignaturePoK::new::<_, Blake2b512>(&mut rng, &sig, &[], &vk).unwrap_err(),
        SignaturePoKError::NoBlindedMessages
    );

    let too_many: Vec<_> = blinded.iter().copied().chain([attr("Baz")]).collect();
    assert_eq!(
        SignaturePoK::new::<_, Blake2b512>(&mut rng, &sig, &too_many, &vk).unwrap_err(),
        SignaturePoKError::TooManyBlindedMessages {
            received: 3,
            max: 2,
        }
    );
}

#[test]
fn blind_issuance_over_only_blinded_attributes() {
    let mut rng = StdRng::seed_from_u64(0u64);
    let params = test_params(2);
    let (sk, vk) = keygen(&mut rng, &params).unwrap();
    let (dk, ek) = elgamal::keygen(&mut rng, &params.g1);

    let blinded = attrs(&["Foo", "Bar"]);
    let request =
        BlindSignRequest::new::<_, Blake2b512>(&mut rng, &blinded, &[], &ek, &params).unwrap();
    let sig = BlindSignature::new::<Blake2b512>(&request, &sk, &ek, &[], &params)
        .unwrap()
        .unblind(&dk);

    let show = SignaturePoK::new::<_, Blake2b512>(&mut rng, &sig, &blinded, &vk).unwrap();
    assert!(show.verify::<Blake2b512>(&sig, &[], &vk));
    assert!(sig.verify(&blinded, &vk));
}

#[test]
fn malicious_authorities_cannot_cross_verify() {
    let mut rng = StdRng::seed_from_u64(0u64);
    let params = test_params(3);
    let msgs = attrs(&["Foo", "Bar", "Baz"]);
    let malicious_msgs = attrs(&["Foo2", "Bar2", "Baz2"]);

    let sign_all = |rng: &mut StdRng, msgs: &[Fr], count: usize| {
        (0..count)
            .map(|_| {
                let (sk, vk) = keygen(rng, &params).unwrap();

                (
                    vk,
                    Signature::new_deterministic::<Blake2b512>(msgs, &sk).unwrap(),
                )
            })
            .unzip::<_, _, Vec<_>, Vec<_>>()
    };

    let (vks, sigs) = sign_all(&mut rng, &msgs, 3);
    let (malicious_vks, malicious_sigs) = sign_all(&mut rng, &malicious_msgs, 2);

    let avk = VerificationKey::aggregate(&vks).unwrap();
    let asig = AggregatedSignature::new(&sigs).unwrap();
    let mavk = VerificationKey::aggregate(&malicious_vks).unwrap();
    let masig = AggregatedSignature::new(&malicious_sigs).unwrap();

    assert!(asig.verify(&msgs, &avk));
    assert!(masig.verify(&malicious_msgs, &mavk));

    // credentials from the malicious federation never verify under the honest key
    assert!(!masig.verify(&msgs, &avk));
    assert!(!masig.verify(&malicious_msgs, &avk));
    assert!(!asig.verify(&msgs, &mavk));
}

#[test]
fn threshold_blind_issuance_across_federation_sizes() {
    let mut rng = StdRng::seed_from_u64(0u64);

    for (threshold, total) in [(1u16, 6u16), (3, 6), (6, 6), (1, 1)] {
        for revealed_values in [&["foo", "bar"][..], &[][..]] {
            let blinded = attrs(&["foo2", "bar2"]);
            let revealed = attrs(revealed_values);

            let params = test_params((blinded.len() + revealed.len()) as u32);
            let (dk, ek) = elgamal::keygen(&mut rng, &params.g1);

            let request =
                BlindSignRequest::new::<_, Blake2b512>(&mut rng, &blinded, &revealed, &ek, &params)
                    .unwrap();
            let (sks, vks) = deal(&mut rng, &params, threshold, total).unwrap();

            let sigs: Vec<_> = sks
                .iter()
                .map(|sk| {
                    BlindSignature::new::<Blake2b512>(&request, sk, &ek, &revealed, &params)
                        .unwrap()
                        .unblind(&dk)
                })
                .collect();

            // any `threshold` contributions suffice, whichever authorities they come from
            let subset: Vec<ParticipantId> = crate::helpers::randomly_skip_up_to(
                &mut rng,
                1..=total,
                (total - threshold) as usize,
            )
            .take(threshold as usize)
            .collect();

            let avk = VerificationKey::aggregate_threshold(
                subset.iter().map(|&id| (id, &vks[id as usize - 1])),
            )
            .unwrap();
            let asig = AggregatedSignature::new_threshold(
                subset.iter().map(|&id| (id, &sigs[id as usize - 1])),
            )
            .unwrap();

            let credential = asig.randomize(&mut rng);
            let show =
                SignaturePoK::new::<_, Blake2b512>(&mut rng, &credential, &blinded, &avk).unwrap();

            assert!(show.verify::<Blake2b512>(&credential, &revealed, &avk));
        }
    }
}
