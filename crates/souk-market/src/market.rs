//! The marketplace aggregate and its transactional entry points.
//!
//! Every state-mutating operation runs as one atomic unit: the state lock
//! is held for the whole call, writes are staged on a scratch copy of the
//! state, the token ledger is checkpointed, and notifications are queued.
//! Only when every internal write and every external transfer leg has
//! succeeded does the operation commit — the scratch state replaces the
//! real one and the queued notifications are published. On any failure the
//! scratch copy is dropped and the token checkpoint restored, so no
//! partial effect is ever visible. There are no retries; a failed transfer
//! is a hard failure of that call.

use crate::access::AccessControl;
use crate::catalog::Product;
use crate::error::MarketError;
use crate::escrow::{Purchase, PurchaseStatus};
use crate::events::Event;
use crate::fees::{cancel_split, sale_split};
use crate::registry::{BlockedSeller, Seller, SellerContact};
use crate::reputation::{AUTO_BLOCK_REASON, check_rating_slot, should_auto_block};
use crate::state::MarketState;
use parking_lot::Mutex;
use souk_token::{Address, Amount, TokenLedger};
use std::sync::Arc;
use tracing::{debug, info};

/// The escrow-based marketplace ledger.
///
/// Holds custody of escrowed funds at a dedicated token address; buyers
/// must approve that address before purchasing.
pub struct Marketplace {
    access: AccessControl,
    custody: Address,
    token: Arc<TokenLedger>,
    state: Mutex<MarketState>,
    events: Mutex<Vec<Event>>,
}

impl Marketplace {
    /// Create a marketplace with the given owner and custody address.
    #[must_use]
    pub fn new(token: Arc<TokenLedger>, owner: Address, custody: Address) -> Self {
        Self {
            access: AccessControl::new(owner),
            custody,
            token,
            state: Mutex::new(MarketState::default()),
            events: Mutex::new(Vec::new()),
        }
    }

    /// The owner holding the administrative capability.
    #[must_use]
    pub const fn owner(&self) -> &Address {
        self.access.owner()
    }

    /// The token address holding escrowed funds and accrued fees.
    #[must_use]
    pub const fn custody(&self) -> &Address {
        &self.custody
    }

    // --- Seller registry ----------------------------------------------------

    /// Register a seller with profile and contact data.
    ///
    /// # Errors
    ///
    /// `Validation` for any empty field; `AlreadyRegistered` for a known
    /// identity.
    pub fn register_seller(
        &self,
        identity: &Address,
        name: &str,
        profile_uri: &str,
        location: &str,
        phone: &str,
    ) -> Result<(), MarketError> {
        self.transact(|state, events| {
            state
                .registry
                .register(identity, name, profile_uri, location, phone)?;
            events.push(Event::SellerRegistered {
                seller: identity.clone(),
                name: name.to_string(),
                profile_uri: profile_uri.to_string(),
            });
            Ok(())
        })
    }

    /// Block a seller. Administrative.
    ///
    /// # Errors
    ///
    /// `Unauthorized` unless `caller` is the owner; `AlreadyBlocked` if
    /// the seller is already blocked.
    pub fn block_seller(
        &self,
        caller: &Address,
        seller: &Address,
        reason: &str,
    ) -> Result<(), MarketError> {
        self.access.require_owner(caller)?;
        self.transact(|state, events| {
            state.registry.block(seller, reason)?;
            events.push(Event::SellerBlocked {
                seller: seller.clone(),
                reason: reason.to_string(),
            });
            Ok(())
        })
    }

    /// Unblock a seller. Administrative.
    ///
    /// # Errors
    ///
    /// `Unauthorized` unless `caller` is the owner; `NotBlocked` if the
    /// seller is not blocked.
    pub fn unblock_seller(&self, caller: &Address, seller: &Address) -> Result<(), MarketError> {
        self.access.require_owner(caller)?;
        self.transact(|state, events| {
            state.registry.unblock(seller)?;
            events.push(Event::SellerUnblocked {
                seller: seller.clone(),
            });
            Ok(())
        })
    }

    /// Whether a seller is currently blocked.
    #[must_use]
    pub fn is_blocked(&self, seller: &Address) -> bool {
        self.state.lock().registry.is_blocked(seller)
    }

    /// Look up a seller record.
    #[must_use]
    pub fn seller(&self, identity: &Address) -> Option<Seller> {
        self.state.lock().registry.seller(identity).cloned()
    }

    /// Look up the block record for a seller.
    ///
    /// # Errors
    ///
    /// `NotBlocked` if the seller is not blocked.
    pub fn blocked_detail(&self, seller: &Address) -> Result<BlockedSeller, MarketError> {
        self.state
            .lock()
            .registry
            .blocked_detail(seller)
            .cloned()
    }

    // --- Product catalog ----------------------------------------------------

    /// List a product for a registered, unblocked seller; returns its id.
    ///
    /// # Errors
    ///
    /// `Validation` for empty name/image, zero price, or zero inventory;
    /// `NotRegistered` when the seller has no registry entry;
    /// `SellerBlocked` when the seller is blocked.
    pub fn create_product(
        &self,
        seller: &Address,
        name: &str,
        image_url: &str,
        price: Amount,
        description: &str,
        inventory: u64,
    ) -> Result<u64, MarketError> {
        self.transact(|state, events| {
            if name.is_empty() {
                return Err(MarketError::validation("product name must not be empty"));
            }
            if image_url.is_empty() {
                return Err(MarketError::validation("product image must not be empty"));
            }
            if price.is_zero() {
                return Err(MarketError::validation("price must be positive"));
            }
            if inventory == 0 {
                return Err(MarketError::validation("inventory must be positive"));
            }
            let seller_name = state
                .registry
                .seller(seller)
                .ok_or_else(|| MarketError::NotRegistered {
                    seller: seller.clone(),
                })?
                .name
                .clone();
            if state.registry.is_blocked(seller) {
                return Err(MarketError::SellerBlocked {
                    seller: seller.clone(),
                });
            }

            let id = state.catalog.create(
                seller.clone(),
                seller_name.clone(),
                name,
                image_url,
                price,
                description,
                inventory,
            )?;
            events.push(Event::ProductCreated {
                id,
                name: name.to_string(),
                image_url: image_url.to_string(),
                price,
                seller: seller.clone(),
                seller_name,
                inventory,
            });
            Ok(id)
        })
    }

    /// Look up a product by id; `None` for id 0 or beyond the count.
    #[must_use]
    pub fn product(&self, id: u64) -> Option<Product> {
        self.state.lock().catalog.product(id).cloned()
    }

    // --- Escrow ledger ------------------------------------------------------

    /// Reserve one unit and pay the price into escrow.
    ///
    /// The buyer must have approved the custody address for at least the
    /// product price; the transfer is the final step and the whole
    /// operation rolls back if it fails.
    ///
    /// # Errors
    ///
    /// `ProductNotFound`, `OutOfStock`, `SelfPurchase`, `AlreadyPaid`, or
    /// `TransferFailed` when the escrow pull is refused.
    pub fn purchase(&self, product_id: u64, buyer: &Address) -> Result<(), MarketError> {
        self.transact(|state, events| {
            let product = state
                .catalog
                .product(product_id)
                .cloned()
                .ok_or(MarketError::ProductNotFound { id: product_id })?;
            if product.inventory == 0 {
                return Err(MarketError::OutOfStock { id: product_id });
            }
            if product.seller == *buyer {
                return Err(MarketError::SelfPurchase);
            }

            let key = (product_id, buyer.clone());
            let status = state
                .purchases
                .get(&key)
                .map_or(PurchaseStatus::Open, Purchase::status);
            if !status.can_transition_to(&PurchaseStatus::Paid) {
                return Err(MarketError::AlreadyPaid);
            }

            if let Some(listing) = state.catalog.product_mut(product_id) {
                listing.inventory -= 1;
            }
            let record = state
                .purchases
                .entry(key)
                .or_insert_with(|| Purchase::new(product_id, buyer.clone()));
            record.paid = true;
            record.sold = false;
            debug!(product_id, buyer = %buyer, from = %status, "purchase paid into escrow");

            events.push(Event::ProductPurchased {
                id: product_id,
                name: product.name,
                price: product.price,
                seller: product.seller,
                buyer: buyer.clone(),
                paid: true,
            });

            if !self
                .token
                .transfer_from(&self.custody, buyer, &self.custody, product.price)
            {
                return Err(MarketError::TransferFailed);
            }
            Ok(())
        })
    }

    /// Confirm receipt, releasing escrow to the seller minus the platform
    /// fee.
    ///
    /// # Errors
    ///
    /// `NotPaid`, `AlreadyConfirmed`, or `TransferFailed` when the payout
    /// is refused.
    pub fn confirm(&self, product_id: u64, buyer: &Address) -> Result<(), MarketError> {
        self.transact(|state, events| {
            let key = (product_id, buyer.clone());
            let record = state.purchases.get_mut(&key).ok_or(MarketError::NotPaid)?;
            if !record.paid {
                return Err(MarketError::NotPaid);
            }
            if record.sold {
                return Err(MarketError::AlreadyConfirmed);
            }
            record.sold = true;

            let product = state
                .catalog
                .product_mut(product_id)
                .ok_or(MarketError::ProductNotFound { id: product_id })?;
            product.total_sold = product.total_sold.saturating_add(1);
            let (seller_id, product_name, price) =
                (product.seller.clone(), product.name.clone(), product.price);

            let split = sale_split(price);
            state.treasury.accrue(split.fee);
            state
                .registry
                .seller_mut(&seller_id)
                .ok_or_else(|| MarketError::NotRegistered {
                    seller: seller_id.clone(),
                })?
                .record_confirmed();
            debug!(product_id, buyer = %buyer, fee = %split.fee, payout = %split.payout, "sale confirmed");

            events.push(Event::PaymentConfirmed {
                id: product_id,
                name: product_name,
                price,
                seller: seller_id.clone(),
                buyer: buyer.clone(),
            });

            if !self.token.transfer(&self.custody, &seller_id, split.payout) {
                return Err(MarketError::TransferFailed);
            }
            Ok(())
        })
    }

    /// Cancel a paid purchase: refund the buyer minus the penalty, pay the
    /// seller their penalty share, and restore the inventory unit.
    ///
    /// # Errors
    ///
    /// `NotPaid`, `AlreadySold`, `RefundTransferFailed` when the buyer
    /// refund is refused, or `PenaltyTransferFailed` when the seller's
    /// penalty share is refused. Either failure rolls the whole operation
    /// back, including the other transfer leg.
    pub fn cancel(&self, product_id: u64, buyer: &Address) -> Result<(), MarketError> {
        self.transact(|state, _events| {
            let key = (product_id, buyer.clone());
            let record = state.purchases.get_mut(&key).ok_or(MarketError::NotPaid)?;
            if !record.paid {
                return Err(MarketError::NotPaid);
            }
            if record.sold {
                return Err(MarketError::AlreadySold);
            }
            record.paid = false;
            record.canceled = true;

            let product = state
                .catalog
                .product_mut(product_id)
                .ok_or(MarketError::ProductNotFound { id: product_id })?;
            product.inventory = product.inventory.saturating_add(1);
            let (seller_id, price) = (product.seller.clone(), product.price);

            let split = cancel_split(price);
            state.treasury.accrue(split.fee_on_penalty);
            state
                .registry
                .seller_mut(&seller_id)
                .ok_or_else(|| MarketError::NotRegistered {
                    seller: seller_id.clone(),
                })?
                .record_canceled();
            debug!(
                product_id,
                buyer = %buyer,
                refund = %split.refund,
                penalty_to_seller = %split.penalty_to_seller,
                fee = %split.fee_on_penalty,
                "purchase canceled"
            );

            if !self.token.transfer(&self.custody, buyer, split.refund) {
                return Err(MarketError::RefundTransferFailed);
            }
            if !self
                .token
                .transfer(&self.custody, &seller_id, split.penalty_to_seller)
            {
                return Err(MarketError::PenaltyTransferFailed);
            }
            Ok(())
        })
    }

    /// Look up the seller's contact details for a product.
    ///
    /// Visible only while the buyer's escrow for that product is currently
    /// paid; a canceled buyer loses access until they repurchase.
    ///
    /// # Errors
    ///
    /// `NotPaid` unless the pair is currently paid; `ProductNotFound` for
    /// an unknown id.
    pub fn seller_contact(
        &self,
        product_id: u64,
        buyer: &Address,
    ) -> Result<SellerContact, MarketError> {
        let state = self.state.lock();
        let paid = state
            .purchases
            .get(&(product_id, buyer.clone()))
            .is_some_and(|record| record.paid);
        if !paid {
            return Err(MarketError::NotPaid);
        }
        let product = state
            .catalog
            .product(product_id)
            .ok_or(MarketError::ProductNotFound { id: product_id })?;
        state
            .registry
            .contact(&product.seller)
            .cloned()
            .ok_or_else(|| MarketError::NotRegistered {
                seller: product.seller.clone(),
            })
    }

    /// Look up the purchase record for a (product, buyer) pair.
    #[must_use]
    pub fn purchase_record(&self, product_id: u64, buyer: &Address) -> Option<Purchase> {
        self.state
            .lock()
            .purchases
            .get(&(product_id, buyer.clone()))
            .cloned()
    }

    // --- Reputation ---------------------------------------------------------

    /// Report a canceled purchase, counting toward the seller's automatic
    /// suspension.
    ///
    /// When the seller reaches the report threshold with zero confirmed
    /// sales they are blocked automatically; if they are already blocked
    /// the report still succeeds and the block is left as is.
    ///
    /// # Errors
    ///
    /// `NotCanceled` when the pair never canceled; `AlreadyReported` when
    /// this cancellation was reported before.
    pub fn report_cancellation(&self, product_id: u64, buyer: &Address) -> Result<(), MarketError> {
        self.transact(|state, events| {
            let key = (product_id, buyer.clone());
            let record = state
                .purchases
                .get_mut(&key)
                .ok_or(MarketError::NotCanceled)?;
            if !record.canceled {
                return Err(MarketError::NotCanceled);
            }
            if record.reported {
                return Err(MarketError::AlreadyReported);
            }
            record.reported = true;

            let seller_id = state
                .catalog
                .product(product_id)
                .ok_or(MarketError::ProductNotFound { id: product_id })?
                .seller
                .clone();
            let seller = state
                .registry
                .seller_mut(&seller_id)
                .ok_or_else(|| MarketError::NotRegistered {
                    seller: seller_id.clone(),
                })?;
            seller.record_reported();

            if should_auto_block(seller) && !state.registry.is_blocked(&seller_id) {
                state.registry.block(&seller_id, AUTO_BLOCK_REASON)?;
                info!(seller = %seller_id, "seller auto-blocked");
                events.push(Event::SellerBlocked {
                    seller: seller_id,
                    reason: AUTO_BLOCK_REASON.to_string(),
                });
            }
            Ok(())
        })
    }

    /// Rate a seller, consuming one of their confirmed-purchase rating
    /// slots. Returns the new cumulative rating.
    ///
    /// # Errors
    ///
    /// `NotRegistered` for an unknown seller; `NoConfirmedPurchases` or
    /// `RatingExceeded` when no slot is free.
    pub fn rate_seller(&self, identity: &Address) -> Result<u64, MarketError> {
        self.transact(|state, events| {
            let seller = state
                .registry
                .seller_mut(identity)
                .ok_or_else(|| MarketError::NotRegistered {
                    seller: identity.clone(),
                })?;
            check_rating_slot(identity, seller)?;
            seller.rating = seller.rating.saturating_add(1);
            let rating = seller.rating;

            events.push(Event::SellerRated {
                seller: identity.clone(),
                rating,
            });
            Ok(rating)
        })
    }

    // --- Fee treasury -------------------------------------------------------

    /// Total platform fees accrued and not yet withdrawn.
    #[must_use]
    pub fn total_fees(&self) -> Amount {
        self.state.lock().treasury.total()
    }

    /// Withdraw the full accrued fee total to `destination`. Administrative.
    ///
    /// Returns the amount withdrawn; a zero-fee withdrawal is a no-op
    /// transfer of zero and succeeds.
    ///
    /// # Errors
    ///
    /// `Unauthorized` unless `caller` is the owner; `InvalidDestination`
    /// for the null identity; `FeeTransferFailed` when the transfer is
    /// refused (the accrual is left unchanged).
    pub fn withdraw_fees(
        &self,
        caller: &Address,
        destination: &Address,
    ) -> Result<Amount, MarketError> {
        self.access.require_owner(caller)?;
        if destination.is_null() {
            return Err(MarketError::InvalidDestination);
        }
        self.transact(|state, _events| {
            let amount = state.treasury.drain();
            if !self.token.transfer(&self.custody, destination, amount) {
                return Err(MarketError::FeeTransferFailed);
            }
            info!(destination = %destination, amount = %amount, "fees withdrawn");
            Ok(amount)
        })
    }

    // --- Notifications ------------------------------------------------------

    /// Drain all published notifications, oldest first.
    #[must_use]
    pub fn take_events(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.lock())
    }

    // --- Transaction wrapper ------------------------------------------------

    /// Run one operation as an atomic unit.
    ///
    /// Writes go to a scratch copy of the state and the token ledger is
    /// checkpointed before the closure runs; commit swaps the scratch in
    /// and publishes queued events, abort restores the token checkpoint
    /// and drops everything staged.
    ///
    /// Events are published while the state lock is still held (lock
    /// order: state, then events) so the log order always matches commit
    /// order and a committed state change is never observable ahead of
    /// its notification.
    fn transact<T>(
        &self,
        op: impl FnOnce(&mut MarketState, &mut Vec<Event>) -> Result<T, MarketError>,
    ) -> Result<T, MarketError> {
        let mut state = self.state.lock();
        let checkpoint = self.token.snapshot();
        let mut scratch = state.clone();
        let mut pending = Vec::new();

        match op(&mut scratch, &mut pending) {
            Ok(value) => {
                *state = scratch;
                let mut published = self.events.lock();
                for event in &pending {
                    info!(kind = event.kind(), "notification published");
                }
                published.extend(pending);
                Ok(value)
            }
            Err(err) => {
                self.token.restore(checkpoint);
                debug!(error = %err, "operation aborted, state rolled back");
                Err(err)
            }
        }
    }
}

#[allow(clippy::missing_fields_in_debug)]
impl std::fmt::Debug for Marketplace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Marketplace")
            .field("owner", self.access.owner())
            .field("custody", &self.custody)
            .finish_non_exhaustive()
    }
}
