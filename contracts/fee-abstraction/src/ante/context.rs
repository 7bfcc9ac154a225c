use cosmwasm_std::{BlockInfo, Decimal, Event};

use fee_abstraction::ConvertedFee;

use crate::ante::error::AnteError;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ExecMode {
    /// First admission into the mempool
    CheckTx,
    /// Re-validation of a transaction already in the mempool
    ReCheckTx,
    /// Execution as part of a block
    DeliverTx,
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct GasMeter {
    /// `None` for an infinite meter
    pub limit: Option<u64>,
    pub consumed: u64,
}

impl GasMeter {
    pub fn infinite() -> Self {
        GasMeter {
            limit: None,
            consumed: 0,
        }
    }

    pub fn with_limit(limit: u64) -> Self {
        GasMeter {
            limit: Some(limit),
            consumed: 0,
        }
    }

    pub fn consume(&self, amount: u64, descriptor: &str) -> Result<GasMeter, AnteError> {
        let consumed = self.consumed.saturating_add(amount);
        if let Some(limit) = self.limit {
            if consumed > limit {
                return Err(AnteError::out_of_gas(descriptor, limit, consumed));
            }
        }
        Ok(GasMeter {
            limit: self.limit,
            consumed,
        })
    }
}

/// Per-transaction execution context. Stages never mutate it in place: each returns an updated
/// copy, and a failed stage leaves the caller's copy as it was.
#[derive(Clone, PartialEq, Debug)]
pub struct AnteContext {
    pub mode: ExecMode,
    pub block: BlockInfo,
    /// Max gas of the block, `None` if unbounded
    pub block_gas_limit: Option<u64>,
    /// The validator's local minimum gas price for mempool admission
    pub mempool_min_gas_price: Decimal,
    pub gas_meter: GasMeter,
    /// Gas used by the EVM for the current transaction
    pub transient_gas_used: u64,
    pub priority: i64,
    pub events: Vec<Event>,
    /// The fee charged by the ante handler, in the denom it was paid in. Read by the gas refund
    /// logic after execution.
    pub paid_fees: Option<ConvertedFee>,
}

impl AnteContext {
    pub fn new(mode: ExecMode, block: BlockInfo) -> Self {
        AnteContext {
            mode,
            block,
            block_gas_limit: None,
            mempool_min_gas_price: Decimal::zero(),
            gas_meter: GasMeter::infinite(),
            transient_gas_used: 0,
            priority: 0,
            events: vec![],
            paid_fees: None,
        }
    }

    pub fn is_check_tx(&self) -> bool {
        matches!(self.mode, ExecMode::CheckTx | ExecMode::ReCheckTx)
    }

    pub fn is_recheck_tx(&self) -> bool {
        self.mode == ExecMode::ReCheckTx
    }

    pub fn with_block_gas_limit(mut self, limit: Option<u64>) -> Self {
        self.block_gas_limit = limit;
        self
    }

    pub fn with_mempool_min_gas_price(mut self, price: Decimal) -> Self {
        self.mempool_min_gas_price = price;
        self
    }

    pub fn with_gas_meter(mut self, gas_meter: GasMeter) -> Self {
        self.gas_meter = gas_meter;
        self
    }

    pub fn with_transient_gas_used(mut self, gas: u64) -> Self {
        self.transient_gas_used = gas;
        self
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    pub fn with_paid_fees(mut self, fee: ConvertedFee) -> Self {
        self.paid_fees = Some(fee);
        self
    }
}
