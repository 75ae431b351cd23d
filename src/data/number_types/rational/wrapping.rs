//! # Wrapping existing methods
//!
//! Standard operations on the rational type, simply forwarding to the operations already defined
//! on the inner type.
use crate::data::number_types::rational::Rational;

mod creation {
    use num_rational::BigRational;

    use crate::data::number_types::rational::Rational;

    impl From<i64> for Rational {
        fn from(value: i64) -> Self {
            Self(BigRational::from_integer(value.into()))
        }
    }

    impl From<&Rational> for Rational {
        fn from(value: &Rational) -> Self {
            value.clone()
        }
    }
}

mod identities {
    use num_rational::BigRational;
    use num_traits::{One, Zero};

    use crate::data::number_types::rational::Rational;

    impl Zero for Rational {
        fn zero() -> Self {
            Self(BigRational::zero())
        }

        fn is_zero(&self) -> bool {
            self.0.is_zero()
        }
    }

    impl One for Rational {
        fn one() -> Self {
            Self(BigRational::one())
        }

        fn is_one(&self) -> bool {
            self.0.is_one()
        }
    }
}

mod field {
    use std::iter::Sum;
    use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

    use num_traits::Zero;

    use crate::data::number_types::rational::Rational;

    /// Forward a binary operation and its assigning variant for all combinations of owned and
    /// borrowed operands.
    macro_rules! forward {
        ($operation:ident, $method:ident, $assign_operation:ident, $assign_method:ident) => {
            impl $operation for Rational {
                type Output = Rational;

                fn $method(self, rhs: Rational) -> Self::Output {
                    Rational($operation::$method(self.0, rhs.0))
                }
            }

            impl $operation<&Rational> for Rational {
                type Output = Rational;

                fn $method(self, rhs: &Rational) -> Self::Output {
                    Rational($operation::$method(self.0, &rhs.0))
                }
            }

            impl $operation<Rational> for &Rational {
                type Output = Rational;

                fn $method(self, rhs: Rational) -> Self::Output {
                    Rational($operation::$method(&self.0, rhs.0))
                }
            }

            impl $operation<&Rational> for &Rational {
                type Output = Rational;

                fn $method(self, rhs: &Rational) -> Self::Output {
                    Rational($operation::$method(&self.0, &rhs.0))
                }
            }

            impl $assign_operation for Rational {
                fn $assign_method(&mut self, rhs: Rational) {
                    $assign_operation::$assign_method(&mut self.0, rhs.0);
                }
            }

            impl $assign_operation<&Rational> for Rational {
                fn $assign_method(&mut self, rhs: &Rational) {
                    $assign_operation::$assign_method(&mut self.0, &rhs.0);
                }
            }
        };
    }

    forward!(Add, add, AddAssign, add_assign);
    forward!(Sub, sub, SubAssign, sub_assign);
    forward!(Mul, mul, MulAssign, mul_assign);
    forward!(Div, div, DivAssign, div_assign);

    impl Neg for Rational {
        type Output = Rational;

        fn neg(self) -> Self::Output {
            Rational(-self.0)
        }
    }

    impl Neg for &Rational {
        type Output = Rational;

        fn neg(self) -> Self::Output {
            Rational(-&self.0)
        }
    }

    impl Sum for Rational {
        fn sum<I: Iterator<Item=Self>>(iter: I) -> Self {
            iter.fold(Self::zero(), |total, value| total + value)
        }
    }

    impl<'a> Sum<&'a Rational> for Rational {
        fn sum<I: Iterator<Item=&'a Rational>>(iter: I) -> Self {
            iter.fold(Self::zero(), |total, value| total + value)
        }
    }
}

impl PartialEq<i64> for Rational {
    fn eq(&self, other: &i64) -> bool {
        self.0 == num_rational::BigRational::from_integer((*other).into())
    }
}
