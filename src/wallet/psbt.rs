use {
  super::*,
  bitcoin::{
    absolute::LockTime,
    ecdsa,
    key::TapTweak,
    psbt::{self, Psbt},
    secp256k1::Message,
    sighash::{EcdsaSighashType, Prevouts, SighashCache, TapSighashType},
    taproot,
    transaction::Version,
    Sequence, Transaction, TxIn, TxOut, Witness,
  },
  secp256k1::SECP256K1,
};

/// [`TransactionBuilder`] backed by a PSBT. Inputs must carry their witness
/// UTXO, which is needed to compute signature hashes.
#[derive(Debug, Clone)]
pub struct PsbtBuilder {
  psbt: Psbt,
}

impl PsbtBuilder {
  pub fn new() -> Result<Self> {
    Ok(Self {
      psbt: Psbt::from_unsigned_tx(Transaction {
        version: Version::TWO,
        lock_time: LockTime::ZERO,
        input: Vec::new(),
        output: Vec::new(),
      })?,
    })
  }

  fn prevouts(&self) -> Result<Vec<TxOut>> {
    self
      .psbt
      .inputs
      .iter()
      .enumerate()
      .map(|(i, input)| {
        input
          .witness_utxo
          .clone()
          .ok_or_else(|| anyhow!("input {i} is missing its witness utxo"))
      })
      .collect()
  }
}

impl TransactionBuilder for PsbtBuilder {
  fn add_input(&mut self, input: TxInput) -> Result {
    self.psbt.unsigned_tx.input.push(TxIn {
      previous_output: input.outpoint,
      script_sig: ScriptBuf::new(),
      sequence: Sequence::ENABLE_RBF_NO_LOCKTIME,
      witness: Witness::new(),
    });

    self.psbt.inputs.push(psbt::Input {
      witness_utxo: Some(input.witness_utxo),
      tap_internal_key: input.tap_internal_key,
      ..default()
    });

    Ok(())
  }

  fn add_output(&mut self, output: TxOut) -> Result {
    self.psbt.unsigned_tx.output.push(output);
    self.psbt.outputs.push(default());
    Ok(())
  }

  fn sign_index(&mut self, signer: &Signer, index: usize) -> Result {
    ensure!(
      index < self.psbt.inputs.len(),
      "cannot sign input {index} of transaction with {} inputs",
      self.psbt.inputs.len()
    );

    let prevouts = self.prevouts()?;

    let mut sighash_cache = SighashCache::new(&self.psbt.unsigned_tx);

    match signer.kind() {
      SignerKind::Taproot => {
        ensure!(
          prevouts[index].script_pubkey == signer.script_pubkey(),
          "input {index} is not spendable by taproot signer"
        );

        let sighash_type = TapSighashType::Default;

        let sighash = sighash_cache.taproot_key_spend_signature_hash(
          index,
          &Prevouts::All(&prevouts),
          sighash_type,
        )?;

        let keypair = signer.keypair().tap_tweak(SECP256K1, None);

        let signature = SECP256K1.sign_schnorr_no_aux_rand(
          &Message::from_digest_slice(sighash.as_ref())?,
          &keypair.to_inner(),
        );

        self.psbt.inputs[index].tap_key_sig = Some(taproot::Signature {
          signature,
          sighash_type,
        });
      }
      SignerKind::NativeSegwit => {
        ensure!(
          prevouts[index].script_pubkey == signer.script_pubkey(),
          "input {index} is not spendable by native segwit signer"
        );

        let sighash_type = EcdsaSighashType::All;

        let sighash = sighash_cache.p2wpkh_signature_hash(
          index,
          &prevouts[index].script_pubkey,
          prevouts[index].value,
          sighash_type,
        )?;

        let signature = SECP256K1.sign_ecdsa(
          &Message::from_digest_slice(sighash.as_ref())?,
          &signer.secret_key(),
        );

        self.psbt.inputs[index].partial_sigs.insert(
          bitcoin::PublicKey::new(signer.public_key().0),
          ecdsa::Signature {
            signature,
            sighash_type,
          },
        );
      }
    }

    Ok(())
  }

  fn finalize(&mut self) -> Result {
    for (i, input) in self.psbt.inputs.iter_mut().enumerate() {
      let mut witness = Witness::new();

      if let Some(signature) = input.tap_key_sig {
        witness.push(signature.to_vec());
      } else if let Some((public_key, signature)) = input.partial_sigs.iter().next() {
        witness.push(signature.to_vec());
        witness.push(public_key.to_bytes());
      } else {
        bail!("input {i} is not signed");
      }

      input.final_script_witness = Some(witness);
      input.partial_sigs.clear();
      input.tap_key_sig = None;
      input.tap_internal_key = None;
    }

    Ok(())
  }

  fn extract(&self) -> Result<Transaction> {
    ensure!(
      self
        .psbt
        .inputs
        .iter()
        .all(|input| input.final_script_witness.is_some()),
      "transaction is not finalized"
    );

    Ok(self.psbt.clone().extract_tx_unchecked_fee_rate())
  }
}
