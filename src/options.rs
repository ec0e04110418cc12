//! Game configuration options.

/// Configuration options for a game.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use blitz21::GameOptions;
///
/// let options = GameOptions::default()
///     .with_decks(3)
///     .with_haptics_enabled(false);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOptions {
    /// Number of decks in the shoe. Values below 1 are treated as 1.
    pub decks: u8,
    /// Whether haptic feedback hooks should fire. Cosmetic only; has no
    /// effect on gameplay.
    pub haptics_enabled: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            decks: 1,
            haptics_enabled: true,
        }
    }
}

impl GameOptions {
    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use blitz21::GameOptions;
    ///
    /// let options = GameOptions::default().with_decks(3);
    /// assert_eq!(options.decks, 3);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets whether haptic feedback hooks fire.
    ///
    /// # Example
    ///
    /// ```
    /// use blitz21::GameOptions;
    ///
    /// let options = GameOptions::default().with_haptics_enabled(false);
    /// assert!(!options.haptics_enabled);
    /// ```
    #[must_use]
    pub const fn with_haptics_enabled(mut self, enabled: bool) -> Self {
        self.haptics_enabled = enabled;
        self
    }
}
